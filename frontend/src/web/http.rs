//! 浏览器 HTTP 传输
//!
//! 基于 `gloo-net` 的 fetch 封装，实现 [`crate::transport::HttpClient`]。

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use mentorlink_shared::protocol::HttpMethod;

use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::ResponseReadFailed(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}
