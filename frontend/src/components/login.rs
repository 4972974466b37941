use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::{DEMO_ACCOUNTS, DEMO_PASSWORD};

use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::common::{ErrorBanner, use_flash};
use crate::components::icons::GraduationCap;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

const DEMO_FAILED: &str = "Failed to create demo accounts";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(use_flash().take());
    let (demo_loading, set_demo_loading) = signal(false);
    let (demo_ready, set_demo_ready) = signal(false);

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if email.get().trim().is_empty() || password.get().is_empty() {
                set_error_msg.set(Some("Please fill in all fields".to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);
            set_notice.set(None);

            let api = api.clone();
            spawn_local(async move {
                match login(&auth, &api, email.get_untracked().trim(), &password.get_untracked()).await {
                    Ok(()) => router.navigate_to(AppRoute::Dashboard),
                    Err(message) => set_error_msg.set(Some(message)),
                }
                set_is_submitting.set(false);
            });
        }
    };

    let create_demo_accounts = move |_: leptos::ev::MouseEvent| {
        set_demo_loading.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.create_demo_accounts().await {
                Ok(_) => {
                    log::info!("demo accounts created");
                    set_demo_ready.set(true);
                }
                Err(e) => {
                    log::error!("creating demo accounts failed: {e}");
                    set_error_msg.set(Some(DEMO_FAILED.to_string()));
                }
            }
            set_demo_loading.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Sign in to Solution Scholars"</h1>
                        <p class="text-base-content/70">
                            "Connect academic work with real-world impact"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || notice.get().is_some()>
                            <div role="status" class="alert alert-success text-sm py-2">
                                <span>{move || notice.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <ErrorBanner message=error_msg />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email address"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                autocomplete="email"
                                placeholder="you@example.org"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            <Link to=AppRoute::Register class="link link-primary">
                                "Don't have an account? Sign up"
                            </Link>
                        </p>

                        <div class="divider my-2"></div>

                        <button
                            type="button"
                            class="btn btn-outline"
                            on:click=create_demo_accounts
                            disabled=move || demo_loading.get()
                        >
                            {move || if demo_loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating Demo Accounts..." }.into_any()
                            } else {
                                "Create Demo Accounts".into_any()
                            }}
                        </button>
                        <p class="text-xs text-center text-base-content/60">
                            "Click to create demo accounts for testing all user roles"
                        </p>

                        <Show when=move || demo_ready.get()>
                            <DemoAccounts
                                on_pick=Callback::new(move |address: String| {
                                    set_email.set(address);
                                    set_password.set(DEMO_PASSWORD.to_string());
                                })
                            />
                        </Show>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 演示账户列表；点击后填充登录表单
#[component]
fn DemoAccounts(#[prop(into)] on_pick: Callback<String>) -> impl IntoView {
    view! {
        <div role="status" class="alert alert-info flex-col items-start text-sm">
            <span class="font-semibold">"Demo accounts created successfully! You can now login with:"</span>
            <ul class="w-full space-y-1">
                {DEMO_ACCOUNTS
                    .iter()
                    .map(|(role, address)| {
                        let address = address.to_string();
                        let label = format!("{}: {address} / {DEMO_PASSWORD}", role.label());
                        view! {
                            <li>
                                <button
                                    type="button"
                                    class="btn btn-ghost btn-xs font-mono normal-case"
                                    on:click=move |_| on_pick.run(address.clone())
                                >
                                    {label}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
