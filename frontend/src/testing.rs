//! 测试用 Mock 组件

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use mentorlink_shared::protocol::HttpMethod;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse, KeyValueStore};

pub const TEST_API_BASE: &str = "http://api.test/api";

// =========================================================
// Mock HTTP
// =========================================================

type RouteKey = (HttpMethod, String);

#[derive(Default)]
pub struct MockHttpContext {
    /// Scripted responses per route; the last one is sticky
    routes: RefCell<HashMap<RouteKey, VecDeque<Result<HttpResponse, HttpError>>>>,
    /// Every request seen, in order
    requests: RefCell<Vec<HttpRequest>>,
}

#[derive(Clone, Default)]
pub struct MockHttp {
    pub ctx: Rc<MockHttpContext>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(method, path, Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, method: HttpMethod, path: &str) {
        self.push(
            method,
            path,
            Err(HttpError::NetworkError("connection refused".into())),
        );
    }

    fn push(&self, method: HttpMethod, path: &str, result: Result<HttpResponse, HttpError>) {
        self.ctx
            .routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(result);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.ctx.requests.borrow().clone()
    }

    /// "METHOD /path" for each request, in order
    pub fn log(&self) -> Vec<String> {
        self.ctx
            .requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), path_of(&r.url)))
            .collect()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.ctx
            .requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .count()
    }
}

fn path_of(url: &str) -> &str {
    url.strip_prefix(TEST_API_BASE).unwrap_or(url)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttp {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let key = (req.method, path_of(&req.url).to_string());
        self.ctx.requests.borrow_mut().push(req);

        let mut routes = self.ctx.routes.borrow_mut();
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Ok(HttpResponse::new(404, r#"{"detail":"Not Found"}"#)),
        }
    }
}

// =========================================================
// Mock Storage
// =========================================================

#[derive(Clone, Default)]
pub struct MemoryStore {
    pub items: Rc<RefCell<HashMap<String, String>>>,
    /// Simulates storage that rejects writes (quota, private mode)
    pub refuse_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set("token", token);
        store
    }

    pub fn read_only() -> Self {
        Self {
            refuse_writes: true,
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<String> {
        self.get("token")
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if self.refuse_writes {
            return false;
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}

// =========================================================
// Fixtures
// =========================================================

pub fn test_config() -> Arc<ClientConfig> {
    Arc::new(ClientConfig {
        api_base_url: TEST_API_BASE.to_string(),
        asset_base_url: "http://api.test".to_string(),
        ..ClientConfig::default()
    })
}

pub fn test_api(http: &MockHttp, storage: &MemoryStore) -> ApiClient<MockHttp, MemoryStore> {
    ApiClient::new(test_config(), http.clone(), storage.clone())
}

pub const MENTOR_JSON: &str = r#"{"id":3,"email":"kim@example.com","role":"mentor","profile":{"name":"Kim","bio":"Backend dev","imageUrl":"/api/images/mentor/3","skills":["Rust","Go"]}}"#;
pub const MENTEE_JSON: &str = r#"{"id":4,"email":"lee@example.com","role":"mentee","profile":{"name":"Lee","bio":"Learning","imageUrl":"/api/images/mentee/4","skills":null}}"#;

pub fn mentor() -> mentorlink_shared::User {
    serde_json_wasm::from_str(MENTOR_JSON).unwrap()
}

pub fn mentee() -> mentorlink_shared::User {
    serde_json_wasm::from_str(MENTEE_JSON).unwrap()
}

pub fn match_request_json(id: i64, status: &str) -> String {
    format!(
        r#"{{"id":{},"mentorId":3,"menteeId":4,"message":"Please mentor me","status":"{}"}}"#,
        id, status
    )
}
