use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorlink_shared::{MentorOrder, Role, User, UserId};

use crate::auth::{BrowserApi, use_auth};
use crate::components::common::{AccessDenied, ErrorAlert, NoticeToast, ProfileImage, Spinner};
use crate::screens::mentors::{MSG_ACCESS_DENIED, MentorBrowser, load, send_request};
use crate::web::timer::auto_dismiss;

#[component]
pub fn MentorsPage() -> impl IntoView {
    let auth = use_auth();
    let role = auth.session().user().map(|u| u.role).unwrap_or_default();
    let Some(browser) = MentorBrowser::new(role) else {
        return view! { <AccessDenied message=MSG_ACCESS_DENIED /> }.into_any();
    };

    let browser = RwSignal::new(browser);
    auto_dismiss(browser);
    let api = StoredValue::new(auth.api().clone());

    // 只在过滤条件变化时重新拉取
    let query = Memo::new(move |_| browser.with(|b| b.query()));
    Effect::new(move |_| {
        query.track();
        let api = api.get_value();
        spawn_local(async move {
            load(&browser, &api).await;
        });
    });

    let on_order_change = move |ev: leptos::ev::Event| {
        let order = MentorOrder::parse(&event_target_value(&ev));
        browser.update(|b| b.order_by = order);
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <NoticeToast notice=Signal::derive(move || browser.with(|b| b.notice.clone())) />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body flex-col md:flex-row gap-4">
                    <input
                        type="text"
                        placeholder="Search by skill"
                        class="input input-bordered flex-1"
                        on:input=move |ev| browser.update(|b| b.skill = event_target_value(&ev))
                        prop:value=move || browser.with(|b| b.skill.clone())
                    />
                    <select class="select select-bordered" on:change=on_order_change>
                        <option value="">"Default order"</option>
                        <option value=MentorOrder::Name.as_str()>"Order by name"</option>
                        <option value=MentorOrder::Skill.as_str()>"Order by skill"</option>
                    </select>
                </div>
            </div>

            <ErrorAlert message=Signal::derive(move || browser.with(|b| b.error.clone())) />

            <Show
                when=move || !browser.with(|b| b.loading && b.mentors.is_empty())
                fallback=|| view! { <Spinner /> }
            >
                <Show
                    when=move || browser.with(|b| !b.mentors.is_empty())
                    fallback=|| view! {
                        <p class="text-center py-8 text-base-content/50">"No mentors found."</p>
                    }
                >
                    <div class="grid gap-4 md:grid-cols-2">
                        <For
                            each=move || browser.with(|b| b.mentors.clone())
                            key=|mentor| mentor.id
                            children=move |mentor| view! {
                                <MentorCard mentor=mentor browser=browser api=api.get_value() />
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
    .into_any()
}

#[component]
fn MentorCard(mentor: User, browser: RwSignal<MentorBrowser>, api: BrowserApi) -> impl IntoView {
    let id: UserId = mentor.id;
    let image_url = Signal::stored(mentor.profile.image_url.clone());
    let skills = mentor.skills().to_vec();

    let on_send = move |_: leptos::ev::MouseEvent| {
        let api = api.clone();
        spawn_local(async move {
            send_request(&browser, &api, id).await;
        });
    };

    let sending = move || browser.with(|b| b.draft(id).sending);

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body gap-3">
                <div class="flex items-center gap-4">
                    <div class="avatar">
                        <div class="w-16 rounded-xl">
                            <ProfileImage image_url=image_url role=Role::Mentor />
                        </div>
                    </div>
                    <div>
                        <h3 class="card-title">{mentor.display_name().to_string()}</h3>
                        <p class="text-sm text-base-content/70">{mentor.profile.bio.clone()}</p>
                    </div>
                </div>
                <div class="flex flex-wrap gap-1">
                    {skills
                        .into_iter()
                        .map(|skill| view! { <span class="badge badge-outline">{skill}</span> })
                        .collect_view()}
                </div>
                <textarea
                    class="textarea textarea-bordered"
                    placeholder="Introduce yourself"
                    on:input=move |ev| browser.update(|b| b.set_draft(id, event_target_value(&ev)))
                    prop:value=move || browser.with(|b| b.draft(id).message)
                ></textarea>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary btn-sm" disabled=sending on:click=on_send>
                        {move || if sending() { "Sending..." } else { "Send request" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
