use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorlink_shared::Role;

use crate::auth::use_auth;
use crate::components::common::ErrorAlert;
use crate::screens::auth_forms::{SignupForm, sign_up};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let form = RwSignal::new(SignupForm::default());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = auth.api().clone();
        spawn_local(async move {
            if sign_up(&form, &api).await {
                router.navigate(AppRoute::Login);
            }
        });
    };

    let submitting = move || form.with(|f| f.submitting);

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=Signal::derive(move || form.with(|f| f.error.clone())) />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.email.clone())
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
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.name.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="role">
                                <span class="label-text">"Role"</span>
                            </label>
                            <select
                                id="role"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    let role = Role::parse(&event_target_value(&ev)).unwrap_or_default();
                                    form.update(|f| f.role = role);
                                }
                                prop:value=move || form.with(|f| f.role.as_str())
                            >
                                <option value=Role::Mentee.as_str()>"Mentee"</option>
                                <option value=Role::Mentor.as_str()>"Mentor"</option>
                            </select>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Signing up..." }.into_any()
                                } else {
                                    "Sign up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login class="link link-primary">"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
