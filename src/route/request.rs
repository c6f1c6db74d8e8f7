// ABOUTME: Request and response views handed to template route handlers
// ABOUTME: Wraps the parts of an axum request and collects status/headers for the reply

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;

/// What a route handler sees of the incoming request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl RouteRequest {
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        params: HashMap<String, String>,
        query: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            params,
            query,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Path parameter by name; `"name"` and `":name"` are equivalent
    pub fn params(&self, name: &str) -> Option<&str> {
        let name = name.strip_prefix(':').unwrap_or(name);
        self.params.get(name).map(String::as_str)
    }

    pub fn params_map(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Query string parameter by name
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn query_map(&self) -> &HashMap<String, String> {
        &self.query
    }
}

/// Response metadata a handler can set before returning the body.
#[derive(Debug, Clone)]
pub struct RouteResponse {
    status: StatusCode,
    headers: HeaderMap,
}

impl RouteResponse {
    pub const DEFAULT_CONTENT_TYPE: &'static str = "text/html; charset=utf-8";

    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(Self::DEFAULT_CONTENT_TYPE),
        );
        Self {
            status: StatusCode::OK,
            headers,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn content_type(&mut self, value: &'static str) -> &mut Self {
        self.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        self
    }

    pub fn header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Combine the collected metadata with the rendered body
    pub fn into_response_with(self, body: String) -> Response {
        (self.status, self.headers, body).into_response()
    }
}

impl Default for RouteResponse {
    fn default() -> Self {
        Self::new()
    }
}
