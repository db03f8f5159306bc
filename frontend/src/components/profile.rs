use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, ProfileImage, Spinner};
use crate::screens::profile::{ProfileForm, reload, submit};
use crate::web::file::{read_bytes, selected_file};
use crate::web::timer::auto_dismiss;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    // 守卫已保证此时有用户
    let Some(user) = auth.session().user() else {
        return view! { <Spinner /> }.into_any();
    };

    let role = user.role;
    let form = RwSignal::new(ProfileForm::from_user(&user));
    auto_dismiss(form);

    let user_signal = auth.user_signal();
    let image_url = Signal::derive(move || {
        user_signal
            .get()
            .map(|u| u.profile.image_url)
            .unwrap_or_default()
    });

    let config = auth.config().clone();
    let session = StoredValue::new(auth.session().clone());
    let on_file_change = move |ev: leptos::ev::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        let ticket = form
            .try_update(|f| f.select_image(&file.type_(), file.size() as u64, &config))
            .flatten();
        if let Some(ticket) = ticket {
            spawn_local(async move {
                let bytes = read_bytes(&file).await;
                form.try_update(|f| f.attach_image(ticket, bytes));
            });
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let session = session.get_value();
        spawn_local(async move {
            submit(&form, &session).await;
        });
    };

    let on_reload = move |_: leptos::ev::MouseEvent| {
        let session = session.get_value();
        spawn_local(async move {
            reload(&form, &session).await;
        });
    };

    let saving = move || form.with(|f| f.saving);
    let can_submit = move || form.with(|f| f.can_submit());

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body gap-4" on:submit=on_submit>
                    <div class="flex items-center gap-4">
                        <div class="avatar">
                            <div class="w-24 rounded-xl">
                                <ProfileImage image_url=image_url role=role />
                            </div>
                        </div>
                        <div>
                            <h2 class="card-title">{move || form.with(|f| f.name.clone())}</h2>
                            <span class="badge badge-primary">{role.as_str()}</span>
                        </div>
                    </div>

                    <ErrorAlert message=Signal::derive(move || form.with(|f| f.error.clone())) />
                    {move || form.with(|f| f.success.clone()).map(|msg| view! {
                        <div role="status" class="alert alert-success text-sm py-2">
                            <span>{msg}</span>
                        </div>
                    })}

                    <div class="form-control">
                        <label class="label" for="name">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input
                            id="name"
                            type="text"
                            class="input input-bordered"
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                            prop:value=move || form.with(|f| f.name.clone())
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="bio">
                            <span class="label-text">"Bio"</span>
                        </label>
                        <textarea
                            id="bio"
                            class="textarea textarea-bordered h-24"
                            on:input=move |ev| form.update(|f| f.bio = event_target_value(&ev))
                            prop:value=move || form.with(|f| f.bio.clone())
                        ></textarea>
                    </div>

                    <Show when=move || form.with(|f| f.shows_skills())>
                        <div class="form-control">
                            <label class="label" for="skills">
                                <span class="label-text">"Skills"</span>
                                <span class="label-text-alt">"Comma separated, e.g. React, Go"</span>
                            </label>
                            <input
                                id="skills"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| form.update(|f| f.skills_text = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.skills_text.clone())
                            />
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="image">
                            <span class="label-text">"Profile image"</span>
                            <span class="label-text-alt">"JPG or PNG, up to 1MB"</span>
                        </label>
                        <input
                            id="image"
                            type="file"
                            accept="image/jpeg,image/png"
                            class="file-input file-input-bordered"
                            on:change=on_file_change
                        />
                    </div>

                    <div class="card-actions justify-end">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            disabled=move || !can_submit()
                            on:click=on_reload
                        >
                            "Reload"
                        </button>
                        <button class="btn btn-primary" disabled=move || !can_submit()>
                            {move || if saving() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
    .into_any()
}
