//! 资料编辑页状态
//!
//! 负责：
//! - 从当前用户初始化表单
//! - 技能文本解析、头像校验与编码
//! - 表单到 `ProfileUpdateRequest` 的转换

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mentorlink_shared::{Capability, ProfileUpdateRequest, Role, User, UserId};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{SessionState, SessionStore};
use crate::state::{Generation, StateCell, Ticket};
use crate::transport::{HttpClient, KeyValueStore};

pub const MSG_IMAGE_TOO_LARGE: &str = "Image must be 1MB or smaller.";
pub const MSG_IMAGE_TYPE: &str = "Only JPG or PNG images are supported.";
pub const MSG_NAME_REQUIRED: &str = "Please enter your name.";
pub const MSG_SAVED: &str = "Profile updated.";
const MSG_SAVE_FAILED: &str = "Failed to update profile.";
const MSG_RELOAD_FAILED: &str = "Failed to reload profile.";

/// 逗号分隔，去空白，丢弃空项；保留输入顺序和重复项
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 在读取文件内容之前，按 MIME 类型与大小校验
pub fn validate_image(mime: &str, size: u64, config: &ClientConfig) -> ClientResult<()> {
    if size > config.max_image_bytes {
        return Err(ClientError::validation(MSG_IMAGE_TOO_LARGE));
    }
    if !config.accepts_image_type(mime) {
        return Err(ClientError::validation(MSG_IMAGE_TYPE));
    }
    Ok(())
}

pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub id: UserId,
    pub role: Role,
    pub name: String,
    pub bio: String,
    pub skills_text: String,
    /// 已通过校验并读取完毕的图片字节
    pub image: Option<Vec<u8>>,
    /// 正在读取所选文件
    pub reading_image: bool,
    pub saving: bool,
    /// 正在从服务端重新获取资料
    pub reloading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    /// 每次选择文件领取一张票据，只采用最后一次选择的读取结果
    selection: Generation,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.profile.name.clone(),
            bio: user.profile.bio.clone(),
            skills_text: user.skills().join(", "),
            ..Self::default()
        }
    }

    pub fn shows_skills(&self) -> bool {
        self.role.can(Capability::EditSkills)
    }

    pub fn can_submit(&self) -> bool {
        !self.saving && !self.reading_image && !self.reloading
    }

    /// 用户选择了文件：先校验，通过后返回读取结果要带回的票据
    ///
    /// 校验失败时丢弃之前选的图片并显示错误；仍然领取票据，
    /// 使更早一次选择的读取结果作废。
    pub fn select_image(&mut self, mime: &str, size: u64, config: &ClientConfig) -> Option<Ticket> {
        self.image = None;
        let ticket = self.selection.issue();
        match validate_image(mime, size, config) {
            Ok(()) => {
                self.error = None;
                self.reading_image = true;
                Some(ticket)
            }
            Err(e) => {
                self.error = Some(e.user_message(MSG_SAVE_FAILED));
                self.reading_image = false;
                None
            }
        }
    }

    /// 应用文件读取结果；不是最后一次选择的结果被丢弃，返回是否采用
    pub fn attach_image(&mut self, ticket: Ticket, result: ClientResult<Vec<u8>>) -> bool {
        if !self.selection.is_latest(ticket) {
            return false;
        }
        self.reading_image = false;
        match result {
            Ok(bytes) => self.image = Some(bytes),
            Err(e) => self.error = Some(e.user_message("Could not read the selected image.")),
        }
        true
    }

    pub fn to_request(&self) -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            id: self.id,
            name: self.name.trim().to_string(),
            role: self.role,
            bio: self.bio.clone(),
            image: self.image.as_deref().map(encode_image),
            skills: self
                .shows_skills()
                .then(|| parse_skills(&self.skills_text)),
        }
    }

    pub fn begin_submit(&mut self) -> ClientResult<ProfileUpdateRequest> {
        if !self.can_submit() {
            return Err(ClientError::validation("Please wait for the current operation."));
        }
        if self.name.trim().is_empty() {
            let err = ClientError::validation(MSG_NAME_REQUIRED);
            self.error = Some(err.user_message(MSG_SAVE_FAILED));
            return Err(err);
        }
        self.saving = true;
        self.error = None;
        self.success = None;
        Ok(self.to_request())
    }

    /// 返回服务端确认后的用户，供会话替换
    pub fn finish_submit(&mut self, result: ClientResult<User>) -> Option<User> {
        self.saving = false;
        match result {
            Ok(user) => {
                let mut refreshed = Self::from_user(&user);
                refreshed.success = Some(MSG_SAVED.to_string());
                refreshed.selection = std::mem::take(&mut self.selection);
                *self = refreshed;
                Some(user)
            }
            Err(e) => {
                self.error = Some(e.user_message(MSG_SAVE_FAILED));
                None
            }
        }
    }
}

impl ProfileForm {
    pub fn begin_reload(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.reloading = true;
        self.error = None;
        true
    }

    /// 用服务端的最新资料重置表单，未保存的编辑被丢弃
    pub fn finish_reload(&mut self, result: ClientResult<User>) {
        self.reloading = false;
        match result {
            Ok(user) => {
                let mut reloaded = Self::from_user(&user);
                reloaded.selection = std::mem::take(&mut self.selection);
                *self = reloaded;
            }
            Err(e) => self.error = Some(e.user_message(MSG_RELOAD_FAILED)),
        }
    }
}

/// 重新获取当前用户并重置表单；令牌失效时会话随之结束
pub async fn reload<C, S, K>(form: &impl StateCell<ProfileForm>, session: &SessionStore<C, S, K>)
where
    C: HttpClient,
    S: KeyValueStore,
    K: StateCell<SessionState>,
{
    if form.write_state(|f| f.begin_reload()) != Some(true) {
        return;
    }
    let result = session.refresh().await;
    form.write_state(|f| f.finish_reload(result));
}

/// 提交资料；成功后把新用户写回会话
pub async fn submit<C, S, K>(
    form: &impl StateCell<ProfileForm>,
    session: &SessionStore<C, S, K>,
) -> bool
where
    C: HttpClient,
    S: KeyValueStore,
    K: StateCell<SessionState>,
{
    let Some(Ok(request)) = form.write_state(|f| f.begin_submit()) else {
        return false;
    };

    let result = session.api().update_profile(&request).await;
    match form.write_state(|f| f.finish_submit(result)).flatten() {
        Some(user) => {
            session.update_user(user);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::testing::*;
    use mentorlink_shared::protocol::HttpMethod;

    #[test]
    fn skills_keep_order_and_duplicates() {
        assert_eq!(parse_skills("React, Go, Go"), vec!["React", "Go", "Go"]);
        assert_eq!(parse_skills(" , Rust ,, "), vec!["Rust"]);
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn two_megabyte_image_is_rejected() {
        let config = ClientConfig::default();
        let err = validate_image("image/png", 2 * 1024 * 1024, &config).unwrap_err();
        assert_eq!(err.user_message(""), MSG_IMAGE_TOO_LARGE);
    }

    #[test]
    fn gif_is_rejected() {
        let config = ClientConfig::default();
        let err = validate_image("image/gif", 10, &config).unwrap_err();
        assert_eq!(err.user_message(""), MSG_IMAGE_TYPE);
        assert!(validate_image("image/jpeg", 1024 * 1024, &config).is_ok());
    }

    #[test]
    fn mentee_request_has_no_skills() {
        let form = ProfileForm::from_user(&mentee());
        assert!(!form.shows_skills());
        assert_eq!(form.to_request().skills, None);
    }

    #[test]
    fn mentor_form_round_trips_skills_text() {
        let mut form = ProfileForm::from_user(&mentor());
        assert_eq!(form.skills_text, "Rust, Go");
        form.skills_text = "React, Go, Go".into();
        assert_eq!(
            form.to_request().skills,
            Some(vec!["React".to_string(), "Go".to_string(), "Go".to_string()])
        );
    }

    #[test]
    fn image_is_base64_encoded() {
        let mut form = ProfileForm::from_user(&mentee());
        let ticket = form.select_image("image/png", 3, &ClientConfig::default()).unwrap();
        assert!(!form.can_submit());
        assert!(form.attach_image(ticket, Ok(vec![1, 2, 3])));
        assert!(form.can_submit());
        assert_eq!(form.to_request().image.as_deref(), Some("AQID"));
    }

    #[test]
    fn rejected_selection_drops_previous_image() {
        let mut form = ProfileForm::from_user(&mentee());
        form.image = Some(vec![1]);
        assert!(form.select_image("image/png", 5 * 1024 * 1024, &ClientConfig::default()).is_none());
        assert_eq!(form.image, None);
        assert_eq!(form.error.as_deref(), Some(MSG_IMAGE_TOO_LARGE));
    }

    #[test]
    fn late_read_after_rejected_reselect_is_dropped() {
        let config = ClientConfig::default();
        let mut form = ProfileForm::from_user(&mentee());
        let first = form.select_image("image/png", 10, &config).unwrap();
        assert!(form.select_image("image/gif", 10, &config).is_none());

        // 第一次选择的读取在拒绝之后才完成
        assert!(!form.attach_image(first, Ok(vec![9, 9])));

        assert_eq!(form.image, None);
        assert_eq!(form.error.as_deref(), Some(MSG_IMAGE_TYPE));
        assert!(form.can_submit());
        assert_eq!(form.to_request().image, None);
    }

    #[test]
    fn only_latest_of_two_valid_selections_is_kept() {
        let config = ClientConfig::default();
        let mut form = ProfileForm::from_user(&mentee());
        let first = form.select_image("image/png", 10, &config).unwrap();
        let second = form.select_image("image/jpeg", 10, &config).unwrap();

        assert!(form.attach_image(second, Ok(vec![2])));
        assert!(!form.attach_image(first, Ok(vec![1])));

        assert_eq!(form.image, Some(vec![2]));
        assert!(!form.reading_image);
    }

    #[test]
    fn blank_name_blocks_submit() {
        let mut form = ProfileForm::from_user(&mentee());
        form.name = "   ".into();
        assert!(form.begin_submit().is_err());
        assert!(!form.saving);
        assert_eq!(form.error.as_deref(), Some(MSG_NAME_REQUIRED));
    }

    fn session_for(
        http: &MockHttp,
        storage: &MemoryStore,
    ) -> SessionStore<MockHttp, MemoryStore, RefCell<SessionState>> {
        SessionStore::new(
            test_api(http, storage),
            storage.clone(),
            RefCell::new(SessionState::resolving()),
        )
    }

    #[tokio::test]
    async fn submit_updates_session_user() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/me", 200, MENTOR_JSON);
        let session = session_for(&http, &storage);
        session.init().await;

        let updated = MENTOR_JSON
            .replace("\"name\":\"Kim\"", "\"name\":\"Kim Senior\"")
            .replace("[\"Rust\",\"Go\"]", "[\"React\",\"Go\",\"Go\"]");
        http.respond(HttpMethod::Put, "/profile", 200, &updated);

        let form = RefCell::new(ProfileForm::from_user(&session.user().unwrap()));
        form.borrow_mut().name = "Kim Senior".into();
        form.borrow_mut().skills_text = "React, Go, Go".into();

        assert!(submit(&form, &session).await);

        let user = session.user().unwrap();
        assert_eq!(user.profile.name, "Kim Senior");
        assert_eq!(user.skills(), ["React", "Go", "Go"]);
        assert_eq!(form.borrow().success.as_deref(), Some(MSG_SAVED));
        assert_eq!(
            http.requests().last().unwrap().body.as_deref(),
            Some(r#"{"id":3,"name":"Kim Senior","role":"mentor","bio":"Backend dev","skills":["React","Go","Go"]}"#)
        );
    }

    #[tokio::test]
    async fn failed_submit_keeps_form_and_session() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/me", 200, MENTEE_JSON);
        let session = session_for(&http, &storage);
        session.init().await;

        http.respond(
            HttpMethod::Put,
            "/profile",
            400,
            r#"{"detail":"Image size must be between 500x500 and 1000x1000 pixels"}"#,
        );

        let form = RefCell::new(ProfileForm::from_user(&session.user().unwrap()));
        form.borrow_mut().bio = "new bio".into();

        assert!(!submit(&form, &session).await);

        let form = form.borrow();
        assert_eq!(form.bio, "new bio");
        assert!(!form.saving);
        assert_eq!(
            form.error.as_deref(),
            Some("Image size must be between 500x500 and 1000x1000 pixels")
        );
        assert_eq!(session.user().unwrap().profile.bio, "Learning");
    }

    #[tokio::test]
    async fn reload_discards_edits_and_refreshes_session() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/me", 200, MENTEE_JSON);
        let session = session_for(&http, &storage);
        session.init().await;

        let form = RefCell::new(ProfileForm::from_user(&session.user().unwrap()));
        form.borrow_mut().bio = "unsaved".into();
        http.respond(
            HttpMethod::Get,
            "/me",
            200,
            &MENTEE_JSON.replace("\"bio\":\"Learning\"", "\"bio\":\"Edited elsewhere\""),
        );

        reload(&form, &session).await;

        let form = form.borrow();
        assert!(!form.reloading);
        assert_eq!(form.bio, "Edited elsewhere");
        assert_eq!(session.user().unwrap().profile.bio, "Edited elsewhere");
        assert_eq!(http.count(HttpMethod::Get, "/me"), 2);
    }

    #[tokio::test]
    async fn reload_with_expired_token_ends_session() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/me", 200, MENTEE_JSON);
        let session = session_for(&http, &storage);
        session.init().await;
        http.respond(
            HttpMethod::Get,
            "/me",
            401,
            r#"{"detail":"Could not validate credentials"}"#,
        );

        let form = RefCell::new(ProfileForm::from_user(&session.user().unwrap()));
        reload(&form, &session).await;

        assert_eq!(session.user(), None);
        assert_eq!(storage.token(), None);
        assert_eq!(
            form.borrow().error.as_deref(),
            Some("Could not validate credentials")
        );
    }

    #[tokio::test]
    async fn invalid_form_issues_no_call() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        let session = session_for(&http, &storage);

        let mut initial = ProfileForm::from_user(&mentee());
        initial.name = String::new();
        let form = RefCell::new(initial);

        assert!(!submit(&form, &session).await);
        assert!(http.requests().is_empty());
    }
}
