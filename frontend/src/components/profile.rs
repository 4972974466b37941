use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::User;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::common::date_or_na;
use crate::components::icons::UserCircle;

/// 可选字段的展示值
pub fn or_na(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let session_user = auth.user();

    // 后端返回的最新资料；请求失败时沿用会话中的用户
    let (fresh, set_fresh) = signal(Option::<User>::None);
    spawn_local(async move {
        match api.get_profile().await {
            Ok(user) => set_fresh.set(Some(user)),
            Err(e) => log::warn!("refreshing profile failed, using session copy: {e}"),
        }
    });

    let user = Memo::new(move |_| fresh.get().or_else(|| session_user.get()));

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8">
            {move || user.get().map(|u| view! { <ProfileBody user=u /> })}
        </div>
    }
}

#[component]
fn ProfileBody(user: User) -> impl IntoView {
    let full_name = user.full_name();
    let role_line = format!("{} • {}", user.email, user.role.profile_description());
    let list_or = |items: Vec<String>, empty: &'static str| {
        if items.is_empty() {
            view! { <p class="text-sm text-base-content/60">{empty}</p> }.into_any()
        } else {
            view! {
                <ul class="list-disc list-inside">
                    {items.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}
                </ul>
            }
            .into_any()
        }
    };

    view! {
        <div class="mb-6">
            <h1 class="text-3xl font-extrabold">{full_name.clone()}</h1>
            <p class="mt-1 text-sm text-base-content/70">{role_line}</p>
        </div>

        <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
            <aside class="md:col-span-1">
                <div class="card bg-base-100 shadow-sm border border-base-200">
                    <div class="card-body p-5">
                        <div class="flex flex-col items-center text-center">
                            <div class="h-24 w-24 rounded-full bg-primary/10 flex items-center justify-center text-primary">
                                <UserCircle attr:class="h-12 w-12" />
                            </div>
                            <div class="mt-3">
                                <div class="text-sm font-medium">{full_name}</div>
                                <div class="text-xs text-base-content/60">{user.role.as_str()}</div>
                            </div>
                        </div>

                        <div class="mt-4 border-t border-base-200 pt-4 text-sm space-y-2">
                            <div>
                                <strong>"Email: "</strong>
                                <a class="link link-primary" href=format!("mailto:{}", user.email)>{user.email.clone()}</a>
                            </div>
                            <div><strong>"Office: "</strong>{or_na(user.office.as_deref())}</div>
                            <div><strong>"Phone: "</strong>{or_na(user.phone.as_deref())}</div>
                        </div>

                        <table class="table table-xs mt-4">
                            <tbody>
                                <tr><th>"First name"</th><td>{user.first_name.clone()}</td></tr>
                                <tr><th>"Last name"</th><td>{user.last_name.clone()}</td></tr>
                                <tr><th>"Title"</th><td>{or_na(user.title.as_deref())}</td></tr>
                                <tr><th>"Member since"</th><td>{date_or_na(user.created_at.as_ref())}</td></tr>
                            </tbody>
                        </table>
                    </div>
                </div>
            </aside>

            <main class="md:col-span-3 space-y-6">
                <section class="card bg-base-100 shadow-sm border border-base-200">
                    <div class="card-body">
                        <h2 class="card-title">"Biography"</h2>
                        <p class="text-sm">
                            {user.biography.clone().unwrap_or_else(|| "No biography available.".to_string())}
                        </p>
                    </div>
                </section>
                <section class="card bg-base-100 shadow-sm border border-base-200">
                    <div class="card-body text-sm">
                        <h2 class="card-title">"Research Interests"</h2>
                        {list_or(user.interests.clone(), "No research interests listed.")}
                    </div>
                </section>
                <section class="card bg-base-100 shadow-sm border border-base-200">
                    <div class="card-body text-sm">
                        <h2 class="card-title">"Courses"</h2>
                        {list_or(user.courses.clone(), "No courses listed.")}
                    </div>
                </section>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_read_na() {
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("  ")), "N/A");
        assert_eq!(or_na(Some("Room 12")), "Room 12");
    }
}
