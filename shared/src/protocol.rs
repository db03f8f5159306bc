use crate::{
    CreateMatchRequest, LoginRequest, LoginResponse, MatchRequest, MentorOrder,
    ProfileUpdateRequest, RequestId, SignupRequest, User,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The gateway client drives every endpoint through this trait, so adding an
/// endpoint means adding a type here, not a method body on the client.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether `self` is serialized as the JSON request body.
    const SENDS_BODY: bool = false;
    /// Whether the success body is decoded. When false the body is ignored
    /// and `Response` is decoded from `null`.
    const RETURNS_BODY: bool = true;

    /// The URL path relative to the API base.
    fn path(&self) -> String;

    /// Query parameters; only set filters are included.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for SignupRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const SENDS_BODY: bool = true;
    const RETURNS_BODY: bool = false;

    fn path(&self) -> String {
        "/signup".to_string()
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/login".to_string()
    }
}

/// Resolve the user behind the current bearer token
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/me".to_string()
    }
}

impl ApiRequest for ProfileUpdateRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/profile".to_string()
    }
}

// =========================================================
// Mentors
// =========================================================

/// List mentors, optionally filtered by a skill substring and ordered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMentorsRequest {
    pub skill: Option<String>,
    pub order_by: Option<MentorOrder>,
}

impl ListMentorsRequest {
    /// Build from raw form values; blank skill text means "no filter".
    pub fn new(skill: &str, order_by: Option<MentorOrder>) -> Self {
        let skill = skill.trim();
        Self {
            skill: (!skill.is_empty()).then(|| skill.to_string()),
            order_by,
        }
    }
}

impl ApiRequest for ListMentorsRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/mentors".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(skill) = &self.skill {
            params.push(("skill", skill.clone()));
        }
        if let Some(order) = self.order_by {
            params.push(("order_by", order.as_str().to_string()));
        }
        params
    }
}

// =========================================================
// Match requests
// =========================================================

impl ApiRequest for CreateMatchRequest {
    type Response = MatchRequest;
    const METHOD: HttpMethod = HttpMethod::Post;
    const SENDS_BODY: bool = true;

    fn path(&self) -> String {
        "/match-requests".to_string()
    }
}

/// Requests addressed to the current mentor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncomingRequestsRequest;

impl ApiRequest for IncomingRequestsRequest {
    type Response = Vec<MatchRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/match-requests/incoming".to_string()
    }
}

/// Requests sent by the current mentee
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutgoingRequestsRequest;

impl ApiRequest for OutgoingRequestsRequest {
    type Response = Vec<MatchRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/match-requests/outgoing".to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AcceptMatchRequest {
    pub id: RequestId,
}

impl ApiRequest for AcceptMatchRequest {
    type Response = MatchRequest;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/match-requests/{}/accept", self.id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RejectMatchRequest {
    pub id: RequestId,
}

impl ApiRequest for RejectMatchRequest {
    type Response = MatchRequest;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/match-requests/{}/reject", self.id)
    }
}

/// Cancel (withdraw) a pending request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelMatchRequest {
    pub id: RequestId,
}

impl ApiRequest for CancelMatchRequest {
    type Response = MatchRequest;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/match-requests/{}", self.id)
    }
}
