//! Authentication gateway boundary.
//!
//! [`AuthGateway`] is the narrow interface the session store drives; the
//! transport behind it is an external collaborator. [`HttpAuthGateway`] is
//! the production implementation against the backend's JSON auth API.
//!
//! Error mapping: a response the server produced (any non-2xx) becomes
//! [`Error::AuthFailed`] carrying the server-provided message; failing to
//! reach the server at all becomes [`Error::Transport`]. The session store
//! treats both identically for state purposes, only the surfaced message
//! differs.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::errors::{Error, Result};
use crate::session::models::{Credentials, User};

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for the authenticated user record.
    async fn login(&self, credentials: &Credentials) -> Result<User>;

    /// Resolve the user behind the currently persisted session, if any.
    async fn fetch_current_user(&self) -> Result<User>;

    /// End the session on the server.
    async fn logout(&self) -> Result<()>;
}

/// Error body shape the backend uses for auth failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// reqwest-backed [`AuthGateway`] against the backend auth API.
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAuthGateway {
    /// Build a gateway with its own client, bounded by `request_timeout`.
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Internal {
                operation: format!("build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a gateway sharing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Fold a response into a user record or an auth failure with the
    /// server's message.
    async fn read_user(operation: &str, response: reqwest::Response) -> Result<User> {
        let status = response.status();
        if status.is_success() {
            response.json::<User>().await.map_err(|e| Error::Internal {
                operation: format!("{operation}: parse user payload: {e}"),
            })
        } else {
            Err(Error::AuthFailed {
                message: Self::failure_message(status, response).await,
            })
        }
    }

    /// Extract the server's error message, falling back to the raw body and
    /// finally to the status code.
    async fn failure_message(status: reqwest::StatusCode, response: reqwest::Response) -> String {
        let body_text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body_text) {
            Ok(ApiErrorBody { message: Some(message) }) => message,
            _ if !body_text.is_empty() => body_text,
            _ => format!("Authentication failed (HTTP {})", status.as_u16()),
        }
    }

    fn transport(operation: &str, err: reqwest::Error) -> Error {
        tracing::warn!("Transport failure during {operation}: {err}");
        Error::Transport {
            operation: operation.to_string(),
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<User> {
        let response = self
            .client
            .post(self.endpoint("auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| Self::transport("log in", e))?;

        Self::read_user("log in", response).await
    }

    async fn fetch_current_user(&self) -> Result<User> {
        let response = self
            .client
            .get(self.endpoint("auth/me"))
            .send()
            .await
            .map_err(|e| Self::transport("fetch current user", e))?;

        Self::read_user("fetch current user", response).await
    }

    async fn logout(&self) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("auth/logout"))
            .send()
            .await
            .map_err(|e| Self::transport("log out", e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::AuthFailed {
                message: Self::failure_message(status, response).await,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials {
            username: "jo".to_string(),
            password: "hunter2".to_string(),
        }
    }

    async fn gateway(server: &MockServer) -> HttpAuthGateway {
        let base_url = Url::parse(&server.uri()).unwrap();
        HttpAuthGateway::new(base_url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_parses_user() {
        let server = MockServer::start().await;
        let user_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"username": "jo", "password": "hunter2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": user_id,
                "username": "jo",
                "email": "jo@example.com",
                "roles": ["user", "Admin"],
            })))
            .mount(&server)
            .await;

        let user = gateway(&server).await.login(&credentials()).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.roles, vec!["user".to_string(), "Admin".to_string()]);
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid username or password"})),
            )
            .mount(&server)
            .await;

        let err = gateway(&server).await.login(&credentials()).await.unwrap_err();
        match err {
            Error::AuthFailed { message } => assert_eq!(message, "Invalid username or password"),
            other => panic!("expected AuthFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_rejection_without_message_falls_back_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = gateway(&server).await.login(&credentials()).await.unwrap_err();
        match err {
            Error::AuthFailed { message } => assert!(message.contains("403"), "got message: {message}"),
            other => panic!("expected AuthFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        // Nothing is listening on this port.
        let base_url = Url::parse("http://127.0.0.1:9").unwrap();
        let gateway = HttpAuthGateway::new(base_url, Duration::from_millis(500)).unwrap();

        let err = gateway.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_current_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": Uuid::new_v4(),
                "username": "jo",
                "email": "jo@example.com",
                "display_name": "Jo",
                "roles": ["user"],
            })))
            .mount(&server)
            .await;

        let user = gateway(&server).await.fetch_current_user().await.unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Jo"));
    }

    #[tokio::test]
    async fn test_logout_success_and_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "session backend down"})))
            .mount(&server)
            .await;

        let gateway = gateway(&server).await;
        gateway.logout().await.unwrap();

        let err = gateway.logout().await.unwrap_err();
        match err {
            Error::AuthFailed { message } => assert_eq!(message, "session backend down"),
            other => panic!("expected AuthFailed, got {other:?}"),
        }
    }
}
