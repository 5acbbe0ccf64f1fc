use gloo_net::http::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use web_sys::AbortSignal;

use crate::config;
use crate::error::ApiError;
use crate::models::*;
use crate::progress::SolveAction;
use crate::session::Session;

/// REST client: base URL plus an optional bearer token.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(session: Option<&Session>) -> Self {
        Self::with_base(config::api_base(), session.map(|s| s.token.clone()))
    }

    pub fn with_base(base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    fn builder(&self, method: Method, path: &str, signal: Option<&AbortSignal>) -> RequestBuilder {
        let builder = RequestBuilder::new(&self.url(path))
            .method(method)
            .abort_signal(signal);
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        signal: Option<&AbortSignal>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.builder(method, path, signal);
        let sent = match body {
            Some(b) => builder.json(b)?.send().await,
            None => builder.send().await,
        };
        let resp = unless_aborted(signal, sent.map_err(ApiError::from))?;
        if resp.ok() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        unless_aborted(signal, Err(ApiError::from_response(resp.status(), &text)))
    }

    /// Generic JSON call.
    pub async fn fetch_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        signal: Option<&AbortSignal>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(method, path, body, signal).await?;
        let parsed = resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()));
        unless_aborted(signal, parsed)
    }

    /// Call whose response body is ignored; any 2xx is success.
    pub async fn fetch_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body, None).await.map(|_| ())
    }

    /* ------------------------------ account ----------------------------- */

    pub async fn login(&self, body: &LoginBody) -> Result<LoginResponse, ApiError> {
        self.fetch_json(Method::POST, "/api/user/login", Some(body), None).await
    }

    pub async fn register(&self, body: &RegisterBody) -> Result<(), ApiError> {
        self.fetch_empty(Method::POST, "/api/auth/register", Some(body)).await
    }

    pub async fn forgot_password(&self, body: &ForgotPasswordBody) -> Result<PasswordReply, ApiError> {
        self.fetch_json(Method::POST, "/api/user/forgot-password", Some(body), None).await
    }

    pub async fn reset_password(&self, body: &ResetPasswordBody) -> Result<PasswordReply, ApiError> {
        self.fetch_json(Method::POST, "/api/user/reset-password", Some(body), None).await
    }

    pub async fn me(&self, signal: Option<&AbortSignal>) -> Result<UserProfile, ApiError> {
        self.fetch_json::<(), _>(Method::GET, "/api/user/me", None, signal).await
    }

    pub async fn update_me(&self, body: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.fetch_json(Method::PUT, "/api/user/me", Some(body), None).await
    }

    /* ---------------------------- categories ---------------------------- */

    pub async fn categories(&self, signal: Option<&AbortSignal>) -> Result<Vec<Category>, ApiError> {
        self.fetch_json::<(), _>(Method::GET, "/api/categories", None, signal).await
    }

    pub async fn create_category(&self, body: &NewCategory) -> Result<(), ApiError> {
        self.fetch_empty(Method::POST, "/api/categories", Some(body)).await
    }

    /* ------------------------------ topics ------------------------------ */

    pub async fn topics_in_category(&self, slug: &str, signal: Option<&AbortSignal>) -> Result<Vec<Topic>, ApiError> {
        let path = format!("/api/topics/category/{slug}");
        self.fetch_json::<(), _>(Method::GET, &path, None, signal).await
    }

    pub async fn dsa_topics(&self, signal: Option<&AbortSignal>) -> Result<Vec<Topic>, ApiError> {
        self.fetch_json::<(), _>(Method::GET, "/api/topics/dsa", None, signal).await
    }

    pub async fn child_topics(&self, parent: &str, signal: Option<&AbortSignal>) -> Result<Vec<Topic>, ApiError> {
        let path = format!("/api/topics/children/{parent}");
        self.fetch_json::<(), _>(Method::GET, &path, None, signal).await
    }

    pub async fn topic_detail(&self, slug: &str, signal: Option<&AbortSignal>) -> Result<TopicDetail, ApiError> {
        let path = format!("/api/topics/topic/{slug}");
        self.fetch_json::<(), _>(Method::GET, &path, None, signal).await
    }

    pub async fn markdown_topic(&self, slug: &str, signal: Option<&AbortSignal>) -> Result<MarkdownTopic, ApiError> {
        let path = format!("/api/topics/{slug}");
        self.fetch_json::<(), _>(Method::GET, &path, None, signal).await
    }

    pub async fn create_topic(&self, body: &NewTopic) -> Result<(), ApiError> {
        self.fetch_empty(Method::POST, "/api/topics", Some(body)).await
    }

    pub async fn update_topic(&self, id: i64, body: &TopicUpdate) -> Result<(), ApiError> {
        self.fetch_empty(Method::PUT, &format!("/api/topics/{id}"), Some(body)).await
    }

    pub async fn delete_topic(&self, id: i64) -> Result<(), ApiError> {
        self.fetch_empty::<()>(Method::DELETE, &format!("/api/topics/{id}"), None).await
    }

    /* ----------------------------- problems ----------------------------- */

    pub async fn create_problem(&self, body: &NewProblem) -> Result<(), ApiError> {
        self.fetch_empty(Method::POST, "/api/topics/problem", Some(body)).await
    }

    /// `POST` or `DELETE /api/topics/problem/:id/solve`, chosen from the
    /// problem's current state.
    pub async fn toggle_solved(&self, action: SolveAction, problem_id: i64) -> Result<(), ApiError> {
        self.fetch_empty::<()>(action.method(), &action.path(problem_id), None).await
    }
}

/// Once the view's scope is cancelled every outcome, even an error status
/// whose body was cut short, reads as `Aborted`.
fn unless_aborted<T>(signal: Option<&AbortSignal>, outcome: Result<T, ApiError>) -> Result<T, ApiError> {
    settle_after(signal.is_some_and(AbortSignal::aborted), outcome)
}

fn settle_after<T>(aborted: bool, outcome: Result<T, ApiError>) -> Result<T, ApiError> {
    if aborted {
        Err(ApiError::Aborted)
    } else {
        outcome
    }
}

pub fn solve_path(problem_id: i64) -> String {
    format!("/api/topics/problem/{problem_id}/solve")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchState;
    use crate::session::Role;

    #[test]
    fn urls_join_without_double_slash() {
        let api = ApiClient::with_base("http://localhost:7777/", None);
        assert_eq!(api.url("/api/categories"), "http://localhost:7777/api/categories");
        assert_eq!(api.url("api/topics/dsa"), "http://localhost:7777/api/topics/dsa");
    }

    #[test]
    fn token_comes_from_session() {
        let session = Session { token: "tok".into(), role: Role::User, display_name: "U".into() };
        assert_eq!(ApiClient::new(Some(&session)).token.as_deref(), Some("tok"));
        assert_eq!(ApiClient::new(None).token, None);
    }

    #[test]
    fn error_status_after_cancel_is_dropped() {
        let late = settle_after::<()>(true, Err(ApiError::from_response(404, "")));
        assert!(matches!(late, Err(ApiError::Aborted)));
        assert_eq!(FetchState::settle(late), None);
    }

    #[test]
    fn live_outcomes_pass_through() {
        assert!(matches!(settle_after(false, Ok(7)), Ok(7)));
        let failed = settle_after::<()>(false, Err(ApiError::from_response(404, "")));
        assert!(matches!(failed, Err(ApiError::Status { status: 404, .. })));
    }

    #[test]
    fn solve_endpoint_shape() {
        assert_eq!(solve_path(42), "/api/topics/problem/42/solve");
    }
}
