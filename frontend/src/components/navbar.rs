use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::web::route::nav_links;
use crate::web::router::Link;

/// 顶部导航栏，未登录时不显示
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    move || {
        let auth = auth.clone();
        user.get().map(|user| {
            let role = user.role;
            let links = nav_links(role)
                .into_iter()
                .map(|route| {
                    view! {
                        <li>
                            <Link to=route>{route.nav_label(role)}</Link>
                        </li>
                    }
                })
                .collect_view();

            view! {
                <div class="navbar bg-base-100 shadow-md px-4">
                    <div class="flex-1 gap-2">
                        <span class="text-xl font-bold">"MentorLink"</span>
                        <ul class="menu menu-horizontal px-1">{links}</ul>
                    </div>
                    <div class="flex-none gap-3 items-center">
                        <span class="badge badge-primary">{role.as_str()}</span>
                        <span class="hidden md:inline">{user.display_name().to_string()}</span>
                        <button class="btn btn-outline btn-error btn-sm" on:click=move |_| logout(&auth)>
                            "Log out"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
