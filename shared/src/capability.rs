//! 角色能力表
//!
//! 所有"某角色能做什么"的判断都集中在这里，各页面只查询一次表，
//! 不再在视图里散落 `role == Mentor` 之类的条件判断。
//! 注意：这只是客户端的 UX 守卫，真正的鉴权边界在后端。

use crate::{RequestStatus, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// 浏览导师列表
    BrowseMentors,
    /// 向导师发送匹配请求
    SendRequest,
    /// 查看自己发出的请求
    ViewOutgoing,
    CancelRequest,
    /// 查看收到的请求
    ViewIncoming,
    AcceptRequest,
    RejectRequest,
    /// 编辑技能标签
    EditSkills,
}

const MENTOR_CAPABILITIES: &[Capability] = &[
    Capability::ViewIncoming,
    Capability::AcceptRequest,
    Capability::RejectRequest,
    Capability::EditSkills,
];

const MENTEE_CAPABILITIES: &[Capability] = &[
    Capability::BrowseMentors,
    Capability::SendRequest,
    Capability::ViewOutgoing,
    Capability::CancelRequest,
];

impl Role {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Mentor => MENTOR_CAPABILITIES,
            Role::Mentee => MENTEE_CAPABILITIES,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// 请求列表上的操作按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestAction {
    Accept,
    Reject,
    Cancel,
}

impl RequestAction {
    pub const ALL: [RequestAction; 3] = [
        RequestAction::Accept,
        RequestAction::Reject,
        RequestAction::Cancel,
    ];

    pub fn required_capability(&self) -> Capability {
        match self {
            RequestAction::Accept => Capability::AcceptRequest,
            RequestAction::Reject => Capability::RejectRequest,
            RequestAction::Cancel => Capability::CancelRequest,
        }
    }

    pub fn target_status(&self) -> RequestStatus {
        match self {
            RequestAction::Accept => RequestStatus::Accepted,
            RequestAction::Reject => RequestStatus::Rejected,
            RequestAction::Cancel => RequestStatus::Cancelled,
        }
    }

    /// 角色具备能力且状态迁移合法时才允许该操作
    pub fn is_allowed(&self, role: Role, status: RequestStatus) -> bool {
        role.can(self.required_capability()) && status.can_transition_to(self.target_status())
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestAction::Accept => "Accept",
            RequestAction::Reject => "Reject",
            RequestAction::Cancel => "Cancel request",
        }
    }
}

/// 某角色在某状态的请求上可用的全部操作（按 Accept/Reject/Cancel 顺序）
pub fn available_actions(role: Role, status: RequestStatus) -> Vec<RequestAction> {
    RequestAction::ALL
        .into_iter()
        .filter(|action| action.is_allowed(role, status))
        .collect()
}
