//! 项目表单字段
//!
//! 纯粹的表单输入渲染，职责单一。

use leptos::prelude::*;

use super::form_state::FormState;

#[component]
pub fn ProjectFields(state: FormState) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for="project_title" class="label">
                <span class="label-text">"Title"</span>
            </label>
            <input id="project_title" required
                type="text"
                placeholder="Volunteer scheduling app"
                on:input=move |ev| state.title.set(event_target_value(&ev))
                prop:value=move || state.title.get()
                class="input input-bordered w-full"
            />
        </div>

        <div class="form-control">
            <label for="project_description" class="label">
                <span class="label-text">"Description"</span>
            </label>
            <textarea id="project_description" required
                rows="4"
                placeholder="What problem should students help solve?"
                on:input=move |ev| state.description.set(event_target_value(&ev))
                prop:value=move || state.description.get()
                class="textarea textarea-bordered w-full"
            ></textarea>
        </div>

        <div class="form-control">
            <label for="project_requirements" class="label">
                <span class="label-text">"Requirements"</span>
            </label>
            <textarea id="project_requirements"
                rows="3"
                placeholder="One requirement per line"
                on:input=move |ev| state.requirements.set(event_target_value(&ev))
                prop:value=move || state.requirements.get()
                class="textarea textarea-bordered w-full"
            ></textarea>
            <label class="label">
                <span class="label-text-alt text-base-content/50">"Enter each requirement on a new line"</span>
            </label>
        </div>

        <div class="form-control">
            <label for="project_deadline" class="label">
                <span class="label-text">"Deadline (optional)"</span>
            </label>
            <input id="project_deadline"
                type="date"
                on:input=move |ev| state.deadline.set(event_target_value(&ev))
                prop:value=move || state.deadline.get()
                class="input input-bordered w-full"
            />
        </div>
    }
}
