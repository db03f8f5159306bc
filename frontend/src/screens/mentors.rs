//! 导师浏览页状态
//!
//! 过滤条件变化时重新拉取列表（后端过滤与排序）；
//! 每位导师各自维护消息草稿和发送中标记，互不干扰。

use std::collections::HashMap;

use mentorlink_shared::protocol::ListMentorsRequest;
use mentorlink_shared::{Capability, CreateMatchRequest, MentorOrder, Role, User, UserId};

use super::Notice;
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::state::{Generation, StateCell, Ticket};
use crate::transport::{HttpClient, KeyValueStore};

pub const MSG_ACCESS_DENIED: &str = "Only mentees can browse mentors.";
pub const MSG_EMPTY_MESSAGE: &str = "Please enter a message.";
pub const MSG_SENT: &str = "Match request sent.";
const MSG_LOAD_FAILED: &str = "Failed to load mentors.";
const MSG_SEND_FAILED: &str = "Failed to send the request.";

/// 单个导师卡片上的草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorDraft {
    pub message: String,
    pub sending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorBrowser {
    role: Role,
    pub skill: String,
    pub order_by: Option<MentorOrder>,
    pub mentors: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    drafts: HashMap<UserId, MentorDraft>,
    generation: Generation,
}

impl MentorBrowser {
    /// 角色门禁：不具备浏览能力的角色拿不到浏览器，也就不会发出请求
    ///
    /// 新建时即处于加载中，挂载后立即拉取。
    pub fn new(role: Role) -> Option<Self> {
        if !role.can(Capability::BrowseMentors) {
            return None;
        }
        Some(Self {
            role,
            skill: String::new(),
            order_by: None,
            mentors: Vec::new(),
            loading: true,
            error: None,
            notice: None,
            drafts: HashMap::new(),
            generation: Generation::default(),
        })
    }

    fn permitted(&self) -> bool {
        self.role.can(Capability::BrowseMentors)
    }

    pub fn query(&self) -> ListMentorsRequest {
        ListMentorsRequest::new(&self.skill, self.order_by)
    }

    pub fn draft(&self, mentor_id: UserId) -> MentorDraft {
        self.drafts.get(&mentor_id).cloned().unwrap_or_default()
    }

    pub fn set_draft(&mut self, mentor_id: UserId, message: String) {
        self.drafts.entry(mentor_id).or_default().message = message;
    }

    /// 发起列表请求：领取新票据
    pub fn begin_load(&mut self) -> Option<(Ticket, ListMentorsRequest)> {
        if !self.permitted() {
            self.loading = false;
            self.error = Some(MSG_ACCESS_DENIED.to_string());
            return None;
        }
        self.loading = true;
        Some((self.generation.issue(), self.query()))
    }

    /// 应用列表响应；非最新票据的响应被丢弃，返回是否采用
    pub fn finish_load(&mut self, ticket: Ticket, result: ClientResult<Vec<User>>) -> bool {
        if !self.generation.is_latest(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(mentors) => {
                self.mentors = mentors;
                self.error = None;
            }
            Err(e) => self.error = Some(e.user_message(MSG_LOAD_FAILED)),
        }
        true
    }

    /// 准备发送请求：消息为空或该导师已在发送中则拒绝
    pub fn begin_send(&mut self, mentor_id: UserId) -> ClientResult<CreateMatchRequest> {
        if !self.permitted() {
            return Err(ClientError::validation(MSG_ACCESS_DENIED));
        }
        let draft = self.drafts.entry(mentor_id).or_default();
        if draft.sending {
            return Err(ClientError::validation("A request to this mentor is already being sent."));
        }
        let message = draft.message.trim();
        if message.is_empty() {
            self.notice = Some(Notice::error(MSG_EMPTY_MESSAGE));
            return Err(ClientError::validation(MSG_EMPTY_MESSAGE));
        }
        let request = CreateMatchRequest {
            mentor_id,
            message: message.to_string(),
        };
        draft.sending = true;
        Ok(request)
    }

    pub fn finish_send(&mut self, mentor_id: UserId, result: ClientResult<()>) {
        let draft = self.drafts.entry(mentor_id).or_default();
        draft.sending = false;
        self.notice = Some(match result {
            Ok(()) => {
                draft.message.clear();
                Notice::success(MSG_SENT)
            }
            Err(e) => Notice::error(e.user_message(MSG_SEND_FAILED)),
        });
    }
}

/// 按当前过滤条件拉取导师列表
pub async fn load<C, S>(browser: &impl StateCell<MentorBrowser>, api: &ApiClient<C, S>)
where
    C: HttpClient,
    S: KeyValueStore,
{
    let Some((ticket, query)) = browser.write_state(|b| b.begin_load()).flatten() else {
        return;
    };
    let result = api.list_mentors(&query).await;
    browser.write_state(|b| b.finish_load(ticket, result));
}

/// 向某位导师发送匹配请求
pub async fn send_request<C, S>(
    browser: &impl StateCell<MentorBrowser>,
    api: &ApiClient<C, S>,
    mentor_id: UserId,
) where
    C: HttpClient,
    S: KeyValueStore,
{
    let Some(Ok(request)) = browser.write_state(|b| b.begin_send(mentor_id)) else {
        return;
    };
    let result = api.create_match_request(&request).await.map(|_| ());
    browser.write_state(|b| b.finish_send(mentor_id, result));
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::testing::*;
    use mentorlink_shared::protocol::HttpMethod;

    fn two_mentors() -> String {
        format!(
            "[{},{}]",
            MENTOR_JSON,
            MENTOR_JSON.replace("\"id\":3", "\"id\":5")
        )
    }

    fn browser() -> MentorBrowser {
        MentorBrowser::new(Role::Mentee).unwrap()
    }

    #[test]
    fn only_mentees_have_access() {
        assert!(MentorBrowser::new(Role::Mentee).is_some());
        assert_eq!(MentorBrowser::new(Role::Mentor), None);
    }

    #[test]
    fn new_browser_starts_loading() {
        let browser = browser();
        assert!(browser.loading);
        assert!(browser.mentors.is_empty());
    }

    #[tokio::test]
    async fn mentor_role_issues_no_request() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/mentors", 200, &two_mentors());
        let api = test_api(&http, &storage);

        let state = RefCell::new(MentorBrowser {
            role: Role::Mentor,
            ..browser()
        });
        state.borrow_mut().set_draft(3, "hello".into());
        load(&state, &api).await;
        send_request(&state, &api, 3).await;

        assert!(http.requests().is_empty());
        let state = state.borrow();
        assert!(!state.loading);
        assert!(state.mentors.is_empty());
        assert_eq!(state.error.as_deref(), Some(MSG_ACCESS_DENIED));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut browser = browser();
        browser.skill = "r".into();
        let (first, _) = browser.begin_load().unwrap();
        browser.skill = "rust".into();
        let (second, query) = browser.begin_load().unwrap();
        assert_eq!(query.skill.as_deref(), Some("rust"));

        // 后发的请求先返回
        assert!(browser.finish_load(second, Ok(vec![mentor()])));
        assert!(!browser.finish_load(first, Ok(vec![])));

        assert_eq!(browser.mentors.len(), 1);
        assert!(!browser.loading);
    }

    #[test]
    fn drafts_are_independent() {
        let mut browser = browser();
        browser.set_draft(3, "hello".into());
        browser.set_draft(5, "hi there".into());

        let req = browser.begin_send(3).unwrap();
        assert_eq!(req.mentor_id, 3);
        assert!(browser.draft(3).sending);
        assert!(!browser.draft(5).sending);

        // 另一位导师的发送不受影响
        assert!(browser.begin_send(5).is_ok());
        // 同一位导师不能重复发送
        assert!(browser.begin_send(3).is_err());

        browser.finish_send(3, Ok(()));
        assert_eq!(browser.draft(3), MentorDraft::default());
        assert_eq!(browser.draft(5).message, "hi there");
    }

    #[test]
    fn blank_message_is_rejected_locally() {
        let mut browser = browser();
        browser.set_draft(3, "   ".into());
        assert!(browser.begin_send(3).is_err());
        assert!(!browser.draft(3).sending);
        assert_eq!(browser.notice, Some(Notice::error(MSG_EMPTY_MESSAGE)));
    }

    #[tokio::test]
    async fn load_applies_filters() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/mentors", 200, &two_mentors());
        let api = test_api(&http, &storage);

        let browser = RefCell::new(browser());
        browser.borrow_mut().order_by = Some(MentorOrder::Name);
        load(&browser, &api).await;

        let state = browser.borrow();
        assert_eq!(state.mentors.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3, 5]);
        assert!(!state.loading);
        assert_eq!(
            http.requests()[0].query,
            vec![("order_by".to_string(), "name".to_string())]
        );
    }

    #[tokio::test]
    async fn load_failure_keeps_previous_list() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(HttpMethod::Get, "/mentors", 200, &two_mentors());
        http.fail(HttpMethod::Get, "/mentors");
        let api = test_api(&http, &storage);

        let browser = RefCell::new(browser());
        load(&browser, &api).await;
        load(&browser, &api).await;

        let state = browser.borrow();
        assert_eq!(state.mentors.len(), 2);
        assert_eq!(state.error.as_deref(), Some(MSG_LOAD_FAILED));
    }

    #[tokio::test]
    async fn send_request_clears_draft_on_success() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(
            HttpMethod::Post,
            "/match-requests",
            200,
            &match_request_json(1, "pending"),
        );
        let api = test_api(&http, &storage);

        let browser = RefCell::new(browser());
        browser.borrow_mut().set_draft(3, "  Please mentor me  ".into());
        send_request(&browser, &api, 3).await;

        let state = browser.borrow();
        assert_eq!(state.draft(3), MentorDraft::default());
        assert_eq!(state.notice, Some(Notice::success(MSG_SENT)));
        assert_eq!(
            http.requests()[0].body.as_deref(),
            Some(r#"{"mentorId":3,"message":"Please mentor me"}"#)
        );
    }

    #[tokio::test]
    async fn send_failure_keeps_draft() {
        let http = MockHttp::new();
        let storage = MemoryStore::with_token("t");
        http.respond(
            HttpMethod::Post,
            "/match-requests",
            400,
            r#"{"detail":"You already have a pending request"}"#,
        );
        let api = test_api(&http, &storage);

        let browser = RefCell::new(browser());
        browser.borrow_mut().set_draft(3, "again".into());
        send_request(&browser, &api, 3).await;

        let state = browser.borrow();
        assert_eq!(state.draft(3).message, "again");
        assert!(!state.draft(3).sending);
        assert_eq!(
            state.notice,
            Some(Notice::error("You already have a pending request"))
        );
    }
}
