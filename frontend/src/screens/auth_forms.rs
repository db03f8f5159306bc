//! 登录 / 注册表单

use mentorlink_shared::{LoginRequest, Role, SignupRequest, User};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::session::{SessionState, SessionStore};
use crate::state::StateCell;
use crate::transport::{HttpClient, KeyValueStore};

const MSG_LOGIN_FAILED: &str = "Login failed.";
const MSG_SIGNUP_FAILED: &str = "Sign up failed.";
pub const MSG_FIELDS_REQUIRED: &str = "Please fill in all fields.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn begin_submit(&mut self) -> ClientResult<LoginRequest> {
        if self.submitting {
            return Err(ClientError::validation("Already signing in."));
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(MSG_FIELDS_REQUIRED.to_string());
            return Err(ClientError::validation(MSG_FIELDS_REQUIRED));
        }
        self.submitting = true;
        self.error = None;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: &ClientResult<User>) {
        self.submitting = false;
        match result {
            Ok(_) => self.password.clear(),
            Err(e) => self.error = Some(e.user_message(MSG_LOGIN_FAILED)),
        }
    }
}

/// 登录；成功后路由守卫会把用户带到资料页
pub async fn sign_in<C, S, K>(
    form: &impl StateCell<LoginForm>,
    session: &SessionStore<C, S, K>,
) -> bool
where
    C: HttpClient,
    S: KeyValueStore,
    K: StateCell<SessionState>,
{
    let Some(Ok(credentials)) = form.write_state(|f| f.begin_submit()) else {
        return false;
    };
    let result = session.sign_in(&credentials).await;
    form.write_state(|f| f.finish_submit(&result));
    result.is_ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub submitting: bool,
    pub error: Option<String>,
}

impl SignupForm {
    pub fn begin_submit(&mut self) -> ClientResult<SignupRequest> {
        if self.submitting {
            return Err(ClientError::validation("Already signing up."));
        }
        let missing = [&self.email, &self.password, &self.name]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing {
            self.error = Some(MSG_FIELDS_REQUIRED.to_string());
            return Err(ClientError::validation(MSG_FIELDS_REQUIRED));
        }
        self.submitting = true;
        self.error = None;
        Ok(SignupRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            role: self.role,
        })
    }

    pub fn finish_submit(&mut self, result: &ClientResult<()>) {
        self.submitting = false;
        if let Err(e) = result {
            self.error = Some(e.user_message(MSG_SIGNUP_FAILED));
        }
    }
}

/// 注册；成功时调用方跳转到登录页
pub async fn sign_up<C, S>(form: &impl StateCell<SignupForm>, api: &ApiClient<C, S>) -> bool
where
    C: HttpClient,
    S: KeyValueStore,
{
    let Some(Ok(request)) = form.write_state(|f| f.begin_submit()) else {
        return false;
    };
    let result = api.signup(&request).await;
    form.write_state(|f| f.finish_submit(&result));
    result.is_ok()
}
