use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::{RegisterRequest, Role};

use crate::api::use_api;
use crate::auth::register;
use crate::components::common::{ErrorBanner, use_flash};
use crate::components::icons::GraduationCap;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let flash = use_flash();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let request = RegisterRequest {
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            role: role.get(),
        };

        let api = api.clone();
        spawn_local(async move {
            match register(&api, &request).await {
                Ok(()) => {
                    flash.set("Account created. Please sign in.");
                    router.navigate_to(AppRoute::Login);
                }
                Err(message) => set_error_msg.set(Some(message)),
            }
            set_is_submitting.set(false);
        });
    };

    let text_input = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=move || value.get()
                    class="input input-bordered w-full"
                    required
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Join Solution Scholars"</h1>
                        <p class="text-base-content/70">"Create an account to get started"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=error_msg />

                        <div class="grid grid-cols-2 gap-4">
                            {text_input("first_name", "First name", "text", first_name)}
                            {text_input("last_name", "Last name", "text", last_name)}
                        </div>
                        {text_input("email", "Email address", "email", email)}
                        {text_input("password", "Password", "password", password)}

                        <div class="form-control">
                            <label class="label" for="role">
                                <span class="label-text">"I am a"</span>
                            </label>
                            <select
                                id="role"
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Ok(picked) = event_target_value(&ev).parse::<Role>() {
                                        role.set(picked);
                                    }
                                }
                            >
                                {Role::REGISTERABLE
                                    .into_iter()
                                    .map(|r| view! {
                                        <option value=r.as_str() selected=move || role.get() == r>
                                            {r.label()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Sign up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            <Link to=AppRoute::Login class="link link-primary">
                                "Already have an account? Sign in"
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
