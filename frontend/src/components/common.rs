//! 各页面共用的小组件

use leptos::prelude::*;
use scholars_shared::{ProjectStatus, Timestamp};

use crate::components::icons::AlertCircle;

/// 内联错误提示；消息为 None 时不渲染
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <AlertCircle attr:class="stroke-current shrink-0 h-6 w-6" />
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// 右上角通知，3 秒后自动消失
///
/// 内容为 `(消息, 是否出错)`。
#[component]
pub fn Toast(notification: RwSignal<Option<(String, bool)>>) -> impl IntoView {
    Effect::new(move |_| {
        if notification.with(Option::is_some) {
            set_timeout(
                move || notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || notification.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = notification.with(|n| n.as_ref().is_some_and(|(_, e)| *e));
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

/// 跨页面的一次性提示（例如注册成功后跳转到登录页）
#[derive(Clone, Copy)]
pub struct FlashNotice(RwSignal<Option<String>>);

impl FlashNotice {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn set(&self, message: impl Into<String>) {
        self.0.set(Some(message.into()));
    }

    /// 读取并清除
    pub fn take(&self) -> Option<String> {
        if self.0.with_untracked(Option::is_none) {
            return None;
        }
        let mut taken = None;
        self.0.update(|slot| taken = slot.take());
        taken
    }
}

impl Default for FlashNotice {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_flash() -> FlashNotice {
    use_context::<FlashNotice>().expect("FlashNotice should be provided")
}

pub fn status_badge_class(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Open => "badge badge-success",
        ProjectStatus::InProgress => "badge badge-info",
        ProjectStatus::Completed => "badge badge-ghost",
    }
}

#[component]
pub fn StatusBadge(status: ProjectStatus) -> impl IntoView {
    view! { <span class=status_badge_class(status)>{status.label()}</span> }
}

/// 加载占位卡片
#[component]
pub fn CardSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    (0..count)
        .map(|_| {
            view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body gap-3">
                        <div class="skeleton h-5 w-1/3"></div>
                        <div class="skeleton h-4 w-full"></div>
                        <div class="skeleton h-4 w-2/3"></div>
                    </div>
                </div>
            }
        })
        .collect_view()
}

/// 日期标签；缺失时显示 `N/A`
pub fn date_or_na(at: Option<&Timestamp>) -> String {
    at.map(Timestamp::date_label)
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dates_render_as_na() {
        assert_eq!(date_or_na(None), "N/A");
        let at = Timestamp::parse("2024-02-09T12:00:00Z").unwrap();
        let label = date_or_na(Some(&at));
        assert_eq!(label, at.date_label());
        assert!(label.ends_with("/2024"), "{label}");
    }

    #[test]
    fn each_status_has_distinct_badge() {
        let classes: std::collections::HashSet<_> =
            ProjectStatus::ALL.iter().map(|s| status_badge_class(*s)).collect();
        assert_eq!(classes.len(), ProjectStatus::ALL.len());
    }
}
