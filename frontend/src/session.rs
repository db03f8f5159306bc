//! 会话存储
//!
//! 持有当前令牌与已认证用户，令牌持久化到键值存储。
//! 会话对象由应用根部显式创建并通过上下文传递，不是全局单例，
//! 因此可以脱离浏览器单独测试。
//!
//! 生命周期：
//! - `init`：启动时用已保存的令牌解析用户，失败则静默清除令牌
//! - `login`：保存令牌 -> 获取用户；失败则清空会话并把错误交给调用方
//! - `refresh`：按需重新获取用户
//! - `logout`：同步清空，无网络请求

use leptos::logging::{log, warn};
use mentorlink_shared::{LoginRequest, User};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::state::StateCell;
use crate::transport::{HttpClient, KeyValueStore};

/// 会话状态快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    /// 仅在启动时的首次解析期间为 true，路由守卫据此等待
    pub loading: bool,
}

impl SessionState {
    /// 启动时的初始状态：尚未解析
    pub fn resolving() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::resolving()
    }
}

#[derive(Clone)]
pub struct SessionStore<C, S, K> {
    api: ApiClient<C, S>,
    storage: S,
    state: K,
}

impl<C, S, K> SessionStore<C, S, K>
where
    C: HttpClient,
    S: KeyValueStore,
    K: StateCell<SessionState>,
{
    pub fn new(api: ApiClient<C, S>, storage: S, state: K) -> Self {
        Self {
            api,
            storage,
            state,
        }
    }

    pub fn api(&self) -> &ApiClient<C, S> {
        &self.api
    }

    /// 状态容器（浏览器中是信号，可用于响应式读取）
    pub fn cell(&self) -> &K {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read_state(|s| s.clone()).unwrap_or_default()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read_state(|s| s.user.clone()).flatten()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read_state(|s| s.loading).unwrap_or(false)
    }

    fn token_key(&self) -> &str {
        &self.api.config().token_storage_key
    }

    /// 启动时解析已保存的令牌
    ///
    /// 任何失败都视为令牌过期/无效：静默清除，不向上报错。
    pub async fn init(&self) {
        let stored = self.storage.get(self.token_key());

        if let Some(token) = stored {
            self.state.write_state(|s| s.token = Some(token));
            match self.api.me().await {
                Ok(user) => {
                    log!("[Session] Restored session for user {}.", user.id);
                    self.state.write_state(|s| s.user = Some(user));
                }
                Err(e) => {
                    warn!("[Session] Stored token rejected, clearing. {}", e.in_op("session.init"));
                    self.storage.delete(self.token_key());
                    self.state.write_state(|s| {
                        s.token = None;
                        s.user = None;
                    });
                }
            }
        }

        self.state.write_state(|s| s.loading = false);
    }

    /// 保存令牌并获取当前用户
    pub async fn login(&self, token: String) -> ClientResult<User> {
        if !self.storage.set(self.token_key(), &token) {
            warn!("[Session] Could not persist token; /me will be sent without credentials.");
        }
        self.state.write_state(|s| s.token = Some(token));

        match self.api.me().await {
            Ok(user) => {
                log!("[Session] Logged in as user {}.", user.id);
                self.state.write_state(|s| s.user = Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                self.logout();
                Err(e.in_op("session.login"))
            }
        }
    }

    /// 用邮箱密码登录：`POST /login` 成功后走 [`Self::login`]
    ///
    /// `/login` 失败时不写入任何令牌。
    pub async fn sign_in(&self, credentials: &LoginRequest) -> ClientResult<User> {
        let res = self
            .api
            .login(credentials)
            .await
            .map_err(|e| e.in_op("session.sign_in"))?;
        self.login(res.token).await
    }

    /// 按需重新获取当前用户
    ///
    /// 401 表示令牌失效，结束会话；其他失败保留会话并返回错误。
    pub async fn refresh(&self) -> ClientResult<User> {
        match self.api.me().await {
            Ok(user) => {
                self.update_user(user.clone());
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("[Session] Token no longer valid, logging out.");
                self.logout();
                Err(e.in_op("session.refresh"))
            }
            Err(e) => Err(e.in_op("session.refresh")),
        }
    }

    /// 清除令牌与用户，无网络请求
    pub fn logout(&self) {
        self.storage.delete(self.token_key());
        self.state.write_state(|s| {
            s.token = None;
            s.user = None;
        });
        log!("[Session] Logged out.");
    }

    /// 替换内存中的用户（资料编辑后使用），不重新认证
    pub fn update_user(&self, user: User) {
        self.state.write_state(|s| s.user = Some(user));
    }
}
