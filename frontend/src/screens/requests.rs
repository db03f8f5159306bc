//! 请求收件箱 / 发件箱状态
//!
//! 导师看到收到的请求，学员看到发出的请求，方向由能力表决定。
//! 任何操作成功后都整表重新拉取，以拿到服务端的连带变化
//! （例如接受一个请求后其他待处理请求被自动拒绝）。
//!
//! 重新拉取失败时：用操作返回的请求修补这一项，整表标记为"可能过期"，
//! 不自动重试，等待用户手动刷新。

use std::collections::HashSet;

use leptos::logging::warn;
use mentorlink_shared::{
    Capability, MatchRequest, RequestAction, RequestId, Role, available_actions,
};

use super::Notice;
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::state::{Generation, StateCell, Ticket};
use crate::transport::{HttpClient, KeyValueStore};

const MSG_LOAD_FAILED: &str = "Failed to load requests.";
const MSG_ACTION_FAILED: &str = "The action could not be completed.";
pub const MSG_STALE: &str = "The list could not be refreshed and may be out of date.";

/// 列表方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn for_role(role: Role) -> Option<Self> {
        if role.can(Capability::ViewIncoming) {
            Some(Direction::Incoming)
        } else if role.can(Capability::ViewOutgoing) {
            Some(Direction::Outgoing)
        } else {
            None
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Direction::Incoming => "Incoming requests",
            Direction::Outgoing => "Sent requests",
        }
    }
}

fn success_message(action: RequestAction) -> &'static str {
    match action {
        RequestAction::Accept => "Request accepted.",
        RequestAction::Reject => "Request rejected.",
        RequestAction::Cancel => "Request cancelled.",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBoard {
    pub role: Role,
    pub direction: Direction,
    pub requests: Vec<MatchRequest>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    /// 最近一次操作后的重新拉取失败，列表可能与服务端不一致
    pub stale: bool,
    in_flight: HashSet<RequestId>,
    generation: Generation,
}

impl RequestBoard {
    pub fn new(role: Role) -> Option<Self> {
        let direction = Direction::for_role(role)?;
        Some(Self {
            role,
            direction,
            requests: Vec::new(),
            loading: true,
            error: None,
            notice: None,
            stale: false,
            in_flight: HashSet::new(),
            generation: Generation::default(),
        })
    }

    pub fn is_busy(&self, id: RequestId) -> bool {
        self.in_flight.contains(&id)
    }

    /// 某个请求上应显示的操作按钮
    pub fn actions_for(&self, request: &MatchRequest) -> Vec<RequestAction> {
        available_actions(self.role, request.status)
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.generation.issue()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: ClientResult<Vec<MatchRequest>>) -> bool {
        if !self.generation.is_latest(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(requests) => {
                self.requests = requests;
                self.error = None;
                self.stale = false;
            }
            Err(e) => self.error = Some(e.user_message(MSG_LOAD_FAILED)),
        }
        true
    }

    /// 校验并登记一次操作
    pub fn begin_action(&mut self, id: RequestId, action: RequestAction) -> ClientResult<()> {
        let status = self
            .requests
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status)
            .ok_or_else(|| ClientError::validation("This request is no longer listed."))?;
        if !action.is_allowed(self.role, status) {
            return Err(ClientError::validation("This action is not available."));
        }
        if !self.in_flight.insert(id) {
            return Err(ClientError::validation("This request is already being updated."));
        }
        Ok(())
    }

    /// 记录操作结果；成功时返回服务端给出的新状态，调用方随后整表重新拉取
    pub fn finish_action(
        &mut self,
        id: RequestId,
        action: RequestAction,
        result: ClientResult<MatchRequest>,
    ) -> Option<MatchRequest> {
        self.in_flight.remove(&id);
        match result {
            Ok(updated) => {
                self.notice = Some(Notice::success(success_message(action)));
                Some(updated)
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.user_message(MSG_ACTION_FAILED)));
                None
            }
        }
    }

    /// 操作后的重新拉取结果
    ///
    /// 拉取失败时只修补被操作的那一项，并把列表标记为可能过期。
    pub fn finish_reload(
        &mut self,
        ticket: Ticket,
        result: ClientResult<Vec<MatchRequest>>,
        updated: MatchRequest,
    ) {
        if !self.generation.is_latest(ticket) {
            return;
        }
        match result {
            Ok(requests) => {
                self.finish_load(ticket, Ok(requests));
            }
            Err(e) => {
                warn!("[Requests] Reload after action failed: {}", e);
                self.loading = false;
                if let Some(item) = self.requests.iter_mut().find(|r| r.id == updated.id) {
                    *item = updated;
                }
                self.stale = true;
                self.notice = Some(Notice::error(MSG_STALE));
            }
        }
    }
}

async fn fetch<C, S>(api: &ApiClient<C, S>, direction: Direction) -> ClientResult<Vec<MatchRequest>>
where
    C: HttpClient,
    S: KeyValueStore,
{
    match direction {
        Direction::Incoming => api.incoming_requests().await,
        Direction::Outgoing => api.outgoing_requests().await,
    }
}

pub async fn load<C, S>(board: &impl StateCell<RequestBoard>, api: &ApiClient<C, S>)
where
    C: HttpClient,
    S: KeyValueStore,
{
    let Some((ticket, direction)) = board.write_state(|b| (b.begin_load(), b.direction)) else {
        return;
    };
    let result = fetch(api, direction).await;
    board.write_state(|b| b.finish_load(ticket, result));
}

/// 执行接受 / 拒绝 / 取消，成功后整表重新拉取
pub async fn perform<C, S>(
    board: &impl StateCell<RequestBoard>,
    api: &ApiClient<C, S>,
    id: RequestId,
    action: RequestAction,
) where
    C: HttpClient,
    S: KeyValueStore,
{
    if !matches!(board.write_state(|b| b.begin_action(id, action)), Some(Ok(()))) {
        return;
    }

    let result = match action {
        RequestAction::Accept => api.accept_request(id).await,
        RequestAction::Reject => api.reject_request(id).await,
        RequestAction::Cancel => api.cancel_request(id).await,
    };
    let Some(Some(updated)) = board.write_state(|b| b.finish_action(id, action, result)) else {
        return;
    };

    let Some((ticket, direction)) = board.write_state(|b| (b.begin_load(), b.direction)) else {
        return;
    };
    let reloaded = fetch(api, direction).await;
    board.write_state(|b| b.finish_reload(ticket, reloaded, updated));
}
