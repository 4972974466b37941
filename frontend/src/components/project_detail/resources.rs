//! 资源：项目资源、共享资源库搜索、分享新资源

use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::Resource;

use super::drafts::ResourceDraft;
use crate::api::use_api;
use crate::components::common::ErrorBanner;
use crate::components::icons::{Link2, Search};

const LOAD_FAILED: &str = "Failed to load resources";
const SEARCH_FAILED: &str = "Failed to search resources";
const SHARE_FAILED: &str = "Failed to share resource";

#[component]
pub fn ResourcesTab(project_id: String) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let project_id = StoredValue::new(project_id);

    let (project_resources, set_project_resources) = signal(Vec::<Resource>::new());
    let (library, set_library) = signal(Option::<Vec<Resource>>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let search = RwSignal::new(String::new());

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());
    let tags = RwSignal::new(String::new());

    let load_resources = move || {
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            match api.get_project_resources(&id).await {
                Ok(items) => set_project_resources.set(items),
                Err(e) => {
                    log::error!("loading resources for {id} failed: {e}");
                    set_error_msg.set(Some(LOAD_FAILED.to_string()));
                }
            }
        });
    };

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = api.get_value();
        let query = search.get_untracked();
        spawn_local(async move {
            log::debug!("searching resource library for {query:?}");
            match api.get_resources(&query).await {
                Ok(items) => set_library.set(Some(items)),
                Err(e) => {
                    log::error!("resource search failed: {e}");
                    set_error_msg.set(Some(SEARCH_FAILED.to_string()));
                }
            }
        });
    };

    let on_share = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = ResourceDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            url: url.get_untracked(),
            tags: tags.get_untracked(),
        };
        let resource = match draft.into_new(&project_id.get_value()) {
            Ok(resource) => resource,
            Err(message) => {
                set_error_msg.set(Some(message));
                return;
            }
        };

        set_error_msg.set(None);
        let api = api.get_value();
        spawn_local(async move {
            match api.create_resource(&resource).await {
                Ok(_) => {
                    log::info!("shared resource {}", resource.title);
                    for field in [title, description, url, tags] {
                        field.set(String::new());
                    }
                    load_resources();
                }
                Err(e) => {
                    log::error!("sharing resource failed: {e}");
                    set_error_msg.set(Some(e.user_message(SHARE_FAILED)));
                }
            }
        });
    };

    load_resources();

    view! {
        <h3 class="card-title mb-4">"Project Resources"</h3>
        <ErrorBanner message=error_msg />

        <div class="grid grid-cols-1 lg:grid-cols-2 gap-8 mt-4">
            <section class="space-y-4">
                <Show
                    when=move || !project_resources.with(Vec::is_empty)
                    fallback=|| view! {
                        <div class="text-center py-8 text-base-content/60">
                            <h4 class="font-medium">"No resources yet"</h4>
                            <p class="text-sm mt-1">"Project resources and documents will appear here."</p>
                        </div>
                    }
                >
                    <ul class="space-y-3">
                        <For
                            each=move || project_resources.get()
                            key=|r| r.id.clone()
                            children=|resource| view! { <ResourceItem resource=resource /> }
                        />
                    </ul>
                </Show>

                <form on:submit=on_share class="space-y-2">
                    <h4 class="font-medium">"Share a resource"</h4>
                    <input
                        type="text"
                        placeholder="Title"
                        class="input input-bordered input-sm w-full"
                        on:input=move |ev| title.set(event_target_value(&ev))
                        prop:value=move || title.get()
                    />
                    <textarea
                        placeholder="Description"
                        class="textarea textarea-bordered textarea-sm w-full"
                        on:input=move |ev| description.set(event_target_value(&ev))
                        prop:value=move || description.get()
                    ></textarea>
                    <input
                        type="url"
                        placeholder="https://"
                        class="input input-bordered input-sm w-full"
                        on:input=move |ev| url.set(event_target_value(&ev))
                        prop:value=move || url.get()
                    />
                    <div class="flex gap-2">
                        <input
                            type="text"
                            placeholder="Tags, comma separated"
                            class="input input-bordered input-sm flex-1"
                            on:input=move |ev| tags.set(event_target_value(&ev))
                            prop:value=move || tags.get()
                        />
                        <button type="submit" class="btn btn-primary btn-sm">"Share"</button>
                    </div>
                </form>
            </section>

            <section class="space-y-4">
                <h4 class="font-medium">"Resource Library"</h4>
                <form on:submit=on_search class="join w-full">
                    <input
                        type="search"
                        placeholder="Search shared resources"
                        class="input input-bordered input-sm join-item flex-1"
                        on:input=move |ev| search.set(event_target_value(&ev))
                        prop:value=move || search.get()
                    />
                    <button type="submit" class="btn btn-sm join-item">
                        <Search attr:class="h-4 w-4" />
                    </button>
                </form>
                {move || library.get().map(|items| {
                    if items.is_empty() {
                        view! { <p class="text-sm text-base-content/60">"No matching resources."</p> }.into_any()
                    } else {
                        view! {
                            <ul class="space-y-3">
                                {items.into_iter().map(|resource| view! { <ResourceItem resource=resource /> }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                })}
            </section>
        </div>
    }
}

#[component]
fn ResourceItem(resource: Resource) -> impl IntoView {
    let Resource {
        title,
        description,
        url,
        tags,
        ..
    } = resource;

    view! {
        <li class="bg-base-200 p-3 rounded-lg">
            <p class="font-medium">{title}</p>
            <p class="text-sm text-base-content/70">{description}</p>
            {url.map(|href| view! {
                <a href=href.clone() target="_blank" rel="noopener noreferrer" class="link link-primary text-sm inline-flex items-center gap-1 mt-1">
                    <Link2 attr:class="h-4 w-4" /> {href.clone()}
                </a>
            })}
            <div class="flex flex-wrap gap-1 mt-2">
                {tags.into_iter().map(|tag| view! { <span class="badge badge-ghost badge-sm">{tag}</span> }).collect_view()}
            </div>
        </li>
    }
}
