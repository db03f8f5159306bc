//! MentorLink 前端应用
//!
//! 分层：
//! - `transport` / `api`: 传输抽象与类型化网关客户端
//! - `session`: 会话存储（令牌 + 当前用户）
//! - `screens`: 各页面的状态机与异步流程，不依赖 DOM
//! - `web`: 浏览器实现（fetch、LocalStorage、History 路由、定时器、文件读取）
//! - `auth`: 把会话接到浏览器实现上并放入 Context
//! - `components`: UI 组件层

pub mod api;
mod auth;
pub mod config;
pub mod error;
pub mod screens;
pub mod session;
pub mod state;
pub mod transport;

mod components {
    pub mod common;
    pub mod login;
    pub mod mentors;
    pub mod navbar;
    pub mod profile;
    pub mod requests;
    pub mod signup;
}

pub mod web {
    pub mod file;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    pub mod timer;

    pub use http::FetchClient;
    pub use storage::BrowserStorage;
}

#[cfg(test)]
mod testing;

use crate::auth::provide_auth;
use crate::components::login::LoginPage;
use crate::components::mentors::MentorsPage;
use crate::components::navbar::Navbar;
use crate::components::profile::ProfilePage;
use crate::components::requests::RequestsPage;
use crate::components::signup::SignupPage;
use crate::config::ClientConfig;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 只会收到守卫放行的路由。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Mentors => view! { <MentorsPage /> }.into_any(),
        AppRoute::Requests => view! { <RequestsPage /> }.into_any(),
        AppRoute::Home | AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并开始解析已保存的令牌
    let auth = provide_auth(ClientConfig::default());

    // 2. 会话信号注入路由服务
    let session = auth.state_signal();

    view! {
        <Router session=session>
            <div class="min-h-screen bg-base-200 font-sans">
                <Navbar />
                <RouterOutlet matcher=route_matcher />
            </div>
        </Router>
    }
}
