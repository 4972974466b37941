//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::warn!("[Router] pushState failed: {e:?}");
            }
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
                log::warn!("[Router] replaceState failed: {e:?}");
            }
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
    /// 会话是否仍在从存储恢复
    is_loading: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由从 URL 解析；`/` 等别名会被替换为规范路径。
    /// 守卫要等到会话恢复完成后才生效（见 `setup_auth_redirect`）。
    pub fn new(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        if initial_route != AppRoute::NotFound && initial_route.to_path() != path {
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            is_loading,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn is_loading(&self) -> Signal<bool> {
        self.is_loading
    }

    pub fn is_authenticated(&self) -> Signal<bool> {
        self.is_authenticated
    }

    /// 按 URL path 导航
    pub fn navigate(&self, path: &str) {
        self.navigate_to(AppRoute::from_path(path));
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate_to(&self, target_route: AppRoute) {
        let guarded = if self.is_loading.get_untracked() {
            target_route.clone()
        } else {
            target_route.clone().guard(self.is_authenticated.get_untracked())
        };

        if guarded != target_route {
            log::info!("[Router] {target_route} is not accessible, redirecting to {guarded}");
        }
        self.commit(guarded, true);
    }

    /// 写入 History 并更新 UI；目标与当前路径相同时不产生新的历史记录
    fn commit(&self, route: AppRoute, use_push: bool) {
        let path = route.to_path();
        if route != AppRoute::NotFound && path != current_path() {
            if use_push {
                push_history_state(&path);
            } else {
                replace_history_state(&path);
            }
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let guarded = target_route
                .clone()
                .guard(router.is_authenticated.get_untracked());

            // popstate 时也执行守卫逻辑
            if guarded != target_route {
                log::info!("[Router] popstate to {target_route} blocked, redirecting to {guarded}");
                router.commit(guarded, false);
            } else {
                router.set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            if let Err(e) = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                log::error!("[Router] failed to register popstate listener: {e:?}");
            }
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话恢复完成或认证状态变化时重新执行守卫
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_loading = router.is_loading.get();
            let is_auth = router.is_authenticated.get();
            if is_loading {
                return;
            }

            let route = router.current_route.get_untracked();
            let guarded = route.clone().guard(is_auth);
            if guarded != route {
                if is_auth {
                    log::info!("[Router] Auth state changed: logged in, redirecting to {guarded}.");
                } else {
                    log::info!("[Router] Auth state changed: logged out, redirecting to {guarded}.");
                }
                router.commit(guarded, false);
            }
        });
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文并启动监听，应在 App 根部使用。
#[component]
pub fn Router(
    /// 由组合根创建的路由服务
    service: RouterService,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_context(service);
    service.init_popstate_listener();
    service.setup_auth_redirect();

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件；恢复会话期间或守卫未通过时显示加载页。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        let blocked = router.is_loading().get()
            || current.clone().guard(router.is_authenticated().get()) != current;

        if blocked {
            view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any()
        } else {
            matcher(current)
        }
    }
}

/// 站内链接：拦截点击并通过路由服务导航
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    /// 可为响应式类名（例如导航高亮）
    #[prop(optional, into)]
    class: Signal<String>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: MouseEvent| {
        // 保留新标签页打开等浏览器默认行为
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate_to(to.clone());
    };

    view! {
        <a href=href class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
