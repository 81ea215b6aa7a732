//! Typed access to the learning platform's REST API.
//!
//! [`ApiClient`] owns the endpoint paths and response decoding. The actual
//! HTTP exchange goes through a [`Transport`], so views can be driven by a
//! scripted transport in tests.

mod csrf;
mod envelope;
mod http;

pub use csrf::{cookie_value, CsrfSource};
pub use envelope::normalize_list;
pub use http::HttpTransport;

use std::future::Future;

use ::http::Method;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::ClientConfig,
    error::ApiError,
    models::{Course, CourseId, Job, JobId, Lesson, LessonId, Progress, QuestionId, QuizQuestion},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `/courses/1/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Null` for empty bodies.
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// One HTTP round trip against the API root.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// Optional filters for `GET /jobs/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub q: String,
    pub position_type: String,
}

impl JobQuery {
    /// The non-empty filters as `(name, value)` pairs.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [("q", self.q.as_str()), ("position_type", self.position_type.as_str())]
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect()
    }

    /// `?q=...&position_type=...`, or empty when nothing filters.
    pub fn to_query_string(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        format!("?{encoded}")
    }
}

#[derive(Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn http(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(HttpTransport::new(config.clone(), CsrfSource::Document)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sends a request and returns the JSON body of a 2xx response.
    pub async fn call(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let method = request.method.clone();
        let path = request.path.clone();
        debug!("API request: {method} {path}");

        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!("API request {method} {path} failed: {e}");
        })?;
        debug!("API response: {} {path}", response.status);

        if (200..300).contains(&response.status) {
            Ok(response.body)
        } else {
            let body = match response.body {
                Value::Null => String::new(),
                Value::String(s) => s,
                other => other.to_string(),
            };
            Err(ApiError::from_status(response.status, body))
        }
    }

    async fn fetch<D: for<'de> Deserialize<'de>>(&self, request: ApiRequest) -> Result<D, ApiError> {
        let body = self.call(request).await?;
        if body.is_null() {
            return Err(ApiError::NotFound);
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Asks the backend to set the `csrftoken` cookie before any write.
    pub async fn bootstrap_csrf(&self) -> Result<(), ApiError> {
        self.call(ApiRequest::get("/csrf/")).await.map(|_| ())
    }

    pub async fn courses(&self) -> Result<Vec<Course>, ApiError> {
        let body = self.call(ApiRequest::get("/courses/")).await?;
        Ok(normalize_list(body))
    }

    pub async fn course(&self, id: CourseId) -> Result<Course, ApiError> {
        self.fetch(ApiRequest::get(format!("/courses/{id}/"))).await
    }

    pub async fn course_progress(&self, id: CourseId) -> Result<Progress, ApiError> {
        let body = self
            .call(ApiRequest::get(format!("/courses/{id}/progress/")))
            .await?;
        match body {
            Value::Null => Ok(Progress::default()),
            body => Ok(serde_json::from_value(body)?),
        }
    }

    pub async fn enroll(&self, id: CourseId) -> Result<(), ApiError> {
        self.call(ApiRequest::post(format!("/courses/{id}/enroll/")))
            .await
            .map(|_| ())
    }

    pub async fn reset_progress(&self, id: CourseId) -> Result<(), ApiError> {
        self.call(ApiRequest::post(format!("/courses/{id}/reset_progress/")))
            .await
            .map(|_| ())
    }

    pub async fn lesson(&self, course: CourseId, lesson: LessonId) -> Result<Lesson, ApiError> {
        self.fetch(ApiRequest::get(format!("/courses/{course}/lessons/{lesson}/")))
            .await
    }

    pub async fn jobs(&self, query: &JobQuery) -> Result<Vec<Job>, ApiError> {
        let request = query
            .pairs()
            .into_iter()
            .fold(ApiRequest::get("/jobs/"), |req, (key, value)| req.query(key, value));
        let body = self.call(request).await?;
        Ok(normalize_list(body))
    }

    pub async fn job(&self, id: JobId) -> Result<Job, ApiError> {
        self.fetch(ApiRequest::get(format!("/jobs/{id}/"))).await
    }

    pub async fn quiz_questions(&self, course: CourseId) -> Result<Vec<QuizQuestion>, ApiError> {
        let request = ApiRequest::get("/quiz/questions/").query("course", course.to_string());
        let body = self.call(request).await?;
        Ok(normalize_list(body))
    }

    /// Returns the server's verdict for one answer; a missing `correct` field
    /// counts as wrong.
    pub async fn check_answer(&self, question: QuestionId, answer: &[String]) -> Result<bool, ApiError> {
        let request = ApiRequest::post(format!("/quiz/questions/{question}/check/"))
            .json(json!({ "answer": answer }));
        let body = self.call(request).await?;
        Ok(body.get("correct").and_then(Value::as_bool).unwrap_or(false))
    }
}
