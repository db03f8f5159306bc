use serde::{Deserialize, Serialize};

pub mod capability;
pub mod protocol;

pub use capability::{Capability, RequestAction, available_actions};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 格式化 `Authorization` 头的值
pub fn bearer_value(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

pub type UserId = i64;
pub type RequestId = i64;

/// 用户角色，注册后不可更改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    #[default]
    Mentee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }

    /// 表单 `<select>` 的值解析，未知值返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mentor" => Some(Role::Mentor),
            "mentee" => Some(Role::Mentee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    pub name: String,
    pub bio: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// 仅导师有技能列表；学员为 `None`
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub profile: UserProfile,
}

impl User {
    /// 导航栏显示名，名字为空时退回到邮箱
    pub fn display_name(&self) -> &str {
        if self.profile.name.trim().is_empty() {
            &self.email
        } else {
            &self.profile.name
        }
    }

    pub fn skills(&self) -> &[String] {
        self.profile.skills.as_deref().unwrap_or(&[])
    }
}

/// 匹配请求状态
///
/// 合法迁移只有 `Pending -> Accepted | Rejected | Cancelled`，其余三个状态均为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (
                RequestStatus::Pending,
                RequestStatus::Accepted | RequestStatus::Rejected | RequestStatus::Cancelled
            )
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Cancelled => "Cancelled",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "status-pending",
            RequestStatus::Accepted => "status-accepted",
            RequestStatus::Rejected => "status-rejected",
            RequestStatus::Cancelled => "status-cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub id: RequestId,
    #[serde(rename = "mentorId")]
    pub mentor_id: UserId,
    #[serde(rename = "menteeId")]
    pub mentee_id: UserId,
    pub message: String,
    pub status: RequestStatus,
}

// =========================================================
// 请求/响应体 (Request & Response Bodies)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub bio: String,
    /// Base64 编码的图片原始字节，未选择新图片时省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    #[serde(rename = "mentorId")]
    pub mentor_id: UserId,
    pub message: String,
}

/// 导师列表排序键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorOrder {
    Name,
    Skill,
}

impl MentorOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentorOrder::Name => "name",
            MentorOrder::Skill => "skill",
        }
    }

    /// 空字符串表示使用服务端默认排序
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(MentorOrder::Name),
            "skill" => Some(MentorOrder::Skill),
            _ => None,
        }
    }
}

/// 后端失败响应体：`{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_decodes_backend_shape() {
        let json = r#"{"id":3,"email":"kim@example.com","role":"mentor","profile":{"name":"Kim","bio":"Rust","imageUrl":"/api/images/mentor/3","skills":["Rust","Go"]}}"#;
        let user: User = serde_json_wasm::from_str(json).unwrap();
        assert_eq!(user.role, Role::Mentor);
        assert_eq!(user.profile.image_url, "/api/images/mentor/3");
        assert_eq!(user.skills(), ["Rust".to_string(), "Go".to_string()]);
    }

    #[test]
    fn mentee_profile_without_skills() {
        let json = r#"{"id":4,"email":"lee@example.com","role":"mentee","profile":{"name":"","bio":"","imageUrl":"/api/images/mentee/4","skills":null}}"#;
        let user: User = serde_json_wasm::from_str(json).unwrap();
        assert!(user.skills().is_empty());
        assert_eq!(user.display_name(), "lee@example.com");
    }

    #[test]
    fn profile_update_omits_absent_fields() {
        let req = ProfileUpdateRequest {
            id: 4,
            name: "Lee".into(),
            role: Role::Mentee,
            bio: "hi".into(),
            image: None,
            skills: None,
        };
        let json = serde_json_wasm::to_string(&req).unwrap();
        assert_eq!(json, r#"{"id":4,"name":"Lee","role":"mentee","bio":"hi"}"#);
    }

    #[test]
    fn match_request_uses_camel_case_ids() {
        let json = r#"{"id":7,"mentorId":3,"menteeId":4,"message":"hello","status":"pending"}"#;
        let req: MatchRequest = serde_json_wasm::from_str(json).unwrap();
        assert_eq!(req.mentor_id, 3);
        assert_eq!(req.mentee_id, 4);
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[test]
    fn only_pending_has_outgoing_edges() {
        use RequestStatus::*;
        for next in [Accepted, Rejected, Cancelled] {
            assert!(Pending.can_transition_to(next));
        }
        for terminal in [Accepted, Rejected, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Pending, Accepted, Rejected, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
        assert!(!Pending.can_transition_to(Pending));
    }
}
