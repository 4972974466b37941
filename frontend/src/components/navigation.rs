//! 顶部导航栏，仅在受保护页面显示

use leptos::prelude::*;

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::icons::{GraduationCap, LogOut, Menu, UserCircle};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn Navigation() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());
    let router = use_router();
    let user = auth.user();
    let (menu_open, set_menu_open) = signal(false);

    let link_class = move |target: AppRoute| {
        Signal::derive(move || {
            if router.current_route().get().section() == target {
                "btn btn-ghost btn-sm btn-active".to_string()
            } else {
                "btn btn-ghost btn-sm".to_string()
            }
        })
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        set_menu_open.set(false);
        api.with_value(|api| logout(&auth, api.session()));
    };

    let display_name = move || {
        user.get()
            .map(|u| {
                let name = u.full_name();
                if name.is_empty() { u.email } else { name }
            })
            .unwrap_or_default()
    };

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Dashboard class="btn btn-ghost text-xl gap-2">
                    <GraduationCap attr:class="h-6 w-6 text-primary" />
                    "Solution Scholars"
                </Link>
                <div class="hidden md:flex gap-1 ml-4">
                    <Link to=AppRoute::Dashboard class=link_class(AppRoute::Dashboard)>"Dashboard"</Link>
                    <Link to=AppRoute::Projects class=link_class(AppRoute::Projects)>"Projects"</Link>
                </div>
            </div>

            <div class="flex-none gap-2 hidden md:flex items-center">
                <span class="text-sm text-base-content/70">{display_name}</span>
                <Link to=AppRoute::Profile class=link_class(AppRoute::Profile)>
                    <UserCircle attr:class="h-4 w-4" /> "Your Profile"
                </Link>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Sign out"
                </button>
            </div>

            // 小屏菜单
            <div class="flex-none md:hidden">
                <button
                    class="btn btn-ghost btn-square"
                    aria-label="Toggle navigation"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    <Menu attr:class="h-6 w-6" />
                </button>
            </div>
        </div>

        <Show when=move || menu_open.get()>
            <ul class="menu bg-base-100 shadow md:hidden" on:click=move |_| set_menu_open.set(false)>
                <li class="menu-title">{display_name}</li>
                <li><Link to=AppRoute::Dashboard class=link_class(AppRoute::Dashboard)>"Dashboard"</Link></li>
                <li><Link to=AppRoute::Projects class=link_class(AppRoute::Projects)>"Projects"</Link></li>
                <li><Link to=AppRoute::Profile class=link_class(AppRoute::Profile)>"Your Profile"</Link></li>
                <li><button on:click=on_logout class="text-error">"Sign out"</button></li>
            </ul>
        </Show>
    }
}
