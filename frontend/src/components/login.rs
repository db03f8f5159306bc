use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::common::ErrorAlert;
use crate::screens::auth_forms::{LoginForm, sign_in};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let form = RwSignal::new(LoginForm::default());

    // 成功后无需手动跳转，守卫会把已登录用户带到资料页
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let session = auth.session().clone();
        spawn_local(async move {
            sign_in(&form, &session).await;
        });
    };

    let submitting = move || form.with(|f| f.submitting);

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"MentorLink"</h1>
                    <p class="text-base-content/70">"Log in to find or manage your mentoring."</p>
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
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Log in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <Link to=AppRoute::Signup class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
