//! API 网关客户端
//!
//! 无状态封装：每个后端能力对应一个类型化方法，全部经由 [`ApiClient::call`]。
//! 每次发出请求前从存储中读取令牌并附加 `Authorization: Bearer <token>`，
//! 失败时直接返回携带后端消息的错误，不重试。

use std::sync::Arc;

use leptos::logging::warn;
use mentorlink_shared::protocol::{
    AcceptMatchRequest, ApiRequest, CancelMatchRequest, CurrentUserRequest,
    IncomingRequestsRequest, ListMentorsRequest, OutgoingRequestsRequest, RejectMatchRequest,
};
use mentorlink_shared::{
    CreateMatchRequest, ErrorBody, HEADER_AUTHORIZATION, LoginRequest, LoginResponse,
    MatchRequest, ProfileUpdateRequest, RequestId, SignupRequest, User, bearer_value,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpClient, HttpRequest, KeyValueStore};

#[derive(Clone)]
pub struct ApiClient<C, S> {
    config: Arc<ClientConfig>,
    http: C,
    storage: S,
}

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub fn new(config: Arc<ClientConfig>, http: C, storage: S) -> Self {
        Self {
            config,
            http,
            storage,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 出站钩子：有令牌时附加 Bearer 头
    fn authorize(&self, req: HttpRequest) -> HttpRequest {
        match self.storage.get(&self.config.token_storage_key) {
            Some(token) if !token.is_empty() => {
                req.with_header(HEADER_AUTHORIZATION, &bearer_value(&token))
            }
            _ => req,
        }
    }

    fn build<R: ApiRequest>(&self, request: &R) -> ClientResult<HttpRequest> {
        let mut req = HttpRequest::new(&self.config.api_url(&request.path()), R::METHOD);
        for (key, value) in request.query() {
            req = req.with_query(key, &value);
        }
        if R::SENDS_BODY {
            let body = serde_json_wasm::to_string(request)?;
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }
        Ok(self.authorize(req))
    }

    /// 通用调用：构建 -> 发送 -> 错误映射 -> 解码
    pub async fn call<R: ApiRequest>(&self, request: &R) -> ClientResult<R::Response> {
        let op = format!("{} {}", R::METHOD.as_str(), request.path());
        let req = self.build(request).map_err(|e| e.in_op_with("api.build", &op))?;

        let res = self.http.send(req).await.map_err(|e| {
            let err = ClientError::from(e.clone())
                .with_source(e)
                .in_op_with("api.call", &op);
            warn!("[Api] {}", err);
            err
        })?;

        if !res.ok() {
            // 后端失败体为 {"detail": "..."}；解析不出来就只带状态码
            let detail = serde_json_wasm::from_str::<ErrorBody>(&res.body)
                .ok()
                .map(|b| b.detail);
            let err = ClientError::backend(res.status, detail).in_op_with("api.call", &op);
            warn!("[Api] {}", err);
            return Err(err);
        }

        let body = if R::RETURNS_BODY {
            res.body.as_str()
        } else {
            "null"
        };
        serde_json_wasm::from_str::<R::Response>(body)
            .map_err(|e| ClientError::from(e).in_op_with("api.decode", &op))
    }

    // =========================================================
    // 认证
    // =========================================================

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<()> {
        self.call(request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.call(request).await
    }

    /// 获取当前令牌对应的用户
    pub async fn me(&self) -> ClientResult<User> {
        self.call(&CurrentUserRequest).await
    }

    pub async fn update_profile(&self, request: &ProfileUpdateRequest) -> ClientResult<User> {
        self.call(request).await
    }

    // =========================================================
    // 导师与匹配请求
    // =========================================================

    pub async fn list_mentors(&self, request: &ListMentorsRequest) -> ClientResult<Vec<User>> {
        self.call(request).await
    }

    pub async fn create_match_request(
        &self,
        request: &CreateMatchRequest,
    ) -> ClientResult<MatchRequest> {
        self.call(request).await
    }

    pub async fn incoming_requests(&self) -> ClientResult<Vec<MatchRequest>> {
        self.call(&IncomingRequestsRequest).await
    }

    pub async fn outgoing_requests(&self) -> ClientResult<Vec<MatchRequest>> {
        self.call(&OutgoingRequestsRequest).await
    }

    pub async fn accept_request(&self, id: RequestId) -> ClientResult<MatchRequest> {
        self.call(&AcceptMatchRequest { id }).await
    }

    pub async fn reject_request(&self, id: RequestId) -> ClientResult<MatchRequest> {
        self.call(&RejectMatchRequest { id }).await
    }

    pub async fn cancel_request(&self, id: RequestId) -> ClientResult<MatchRequest> {
        self.call(&CancelMatchRequest { id }).await
    }
}
