//! 认证模块
//!
//! 把会话存储接到浏览器实现上（fetch、LocalStorage、信号），
//! 通过 Context 在组件间共享。路由服务只拿到会话信号，与这里解耦。

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorlink_shared::User;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::session::{SessionState, SessionStore};
use crate::web::{BrowserStorage, FetchClient};

pub type BrowserApi = ApiClient<FetchClient, BrowserStorage>;
pub type BrowserSession = SessionStore<FetchClient, BrowserStorage, RwSignal<SessionState>>;

/// 认证上下文
#[derive(Clone)]
pub struct AuthContext {
    session: BrowserSession,
}

impl AuthContext {
    pub fn new(config: ClientConfig) -> Self {
        let api = ApiClient::new(Arc::new(config), FetchClient, BrowserStorage);
        let state = RwSignal::new(SessionState::resolving());
        Self {
            session: SessionStore::new(api, BrowserStorage, state),
        }
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub fn api(&self) -> &BrowserApi {
        self.session.api()
    }

    pub fn config(&self) -> &ClientConfig {
        self.session.api().config()
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn state_signal(&self) -> Signal<SessionState> {
        (*self.session.cell()).into()
    }

    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = *self.session.cell();
        Signal::derive(move || state.with(|s| s.user.clone()))
    }
}

/// 创建认证上下文并开始解析已保存的令牌
pub fn provide_auth(config: ClientConfig) -> AuthContext {
    let ctx = AuthContext::new(config);
    provide_context(ctx.clone());

    let session = ctx.session.clone();
    spawn_local(async move {
        session.init().await;
    });

    ctx
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 注销
///
/// 不需要手动导航，路由守卫会随会话信号变化自动重定向。
pub fn logout(ctx: &AuthContext) {
    ctx.session.logout();
}
