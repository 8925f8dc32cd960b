//! REST-backed account directory.
//!
//! Talks to the backend account API over HTTP. A successful sign-in
//! retains the session token so the authoritative session check can
//! present it as a bearer credential.

use crate::api::{endpoint_url, AccountService, SessionChecker};
use crate::cli::globals::GlobalArgs;
use crate::flows::types::{Account, Credentials, Session, SignupFields};
use crate::APP_USER_AGENT;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, error};

fn api_error_message(json_response: &Value) -> &str {
    json_response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("")
}

pub struct RestClient {
    client: Client,
    api_url: String,
    api_key: Option<SecretString>,
    session_token: RwLock<Option<SecretString>>,
}

impl RestClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(globals: &GlobalArgs) -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(globals.timeout))
            .build()?;

        Ok(Self {
            client,
            api_url: globals.api_url.clone(),
            api_key: globals.api_key.clone(),
            session_token: RwLock::new(None),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = endpoint_url(&self.api_url, path)?;

        let mut request = self.client.request(method, &url);

        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key.expose_secret());
        }

        Ok(request)
    }

    fn store_session_token(&self, token: Option<SecretString>) {
        if let Ok(mut slot) = self.session_token.write() {
            *slot = token;
        }
    }

    fn session_token(&self) -> Option<SecretString> {
        self.session_token.read().ok().and_then(|slot| slot.clone())
    }
}

#[async_trait]
impl AccountService for RestClient {
    async fn create_account(&self, fields: &SignupFields) -> Result<Option<Account>> {
        let response = self
            .request(Method::POST, "/v1/users")?
            .json(fields)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let account: Account = response.json().await?;
                debug!(account = %account.id, "account created");
                Ok(Some(account))
            }
            StatusCode::CONFLICT => {
                debug!("account already exists");
                Ok(None)
            }
            status => {
                let json_response: Value = response.json().await.unwrap_or_default();
                let message = api_error_message(&json_response);

                error!("Account creation failed: {status}, {message}");

                Err(anyhow!("{status}, {message}"))
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>> {
        let response = self
            .request(Method::POST, "/v1/sessions")?
            .json(credentials)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let session: Session = response.json().await?;
                self.store_session_token(Some(SecretString::from(session.token.clone())));
                Ok(Some(session))
            }
            StatusCode::UNAUTHORIZED => {
                debug!("credentials rejected");
                self.store_session_token(None);
                Ok(None)
            }
            status => {
                let json_response: Value = response.json().await.unwrap_or_default();
                let message = api_error_message(&json_response);

                error!("Sign in failed: {status}, {message}");

                Err(anyhow!("{status}, {message}"))
            }
        }
    }
}

#[async_trait]
impl SessionChecker for RestClient {
    async fn is_authenticated(&self) -> bool {
        // Without a token there is nothing to verify.
        let Some(token) = self.session_token() else {
            return false;
        };

        let request = match self.request(Method::GET, "/v1/sessions/current") {
            Ok(request) => request,
            Err(err) => {
                error!("Session check failed: {err:#}");
                return false;
            }
        };

        match request.bearer_auth(token.expose_secret()).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                // An unverifiable session is not an authenticated one.
                error!("Session check failed: {err:#}");
                false
            }
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn signup_fields() -> SignupFields {
        SignupFields {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "long enough".to_string(),
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "alice@example.com".to_string(),
            password: "long enough".to_string(),
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_new_from_globals() {
        let globals = GlobalArgs::new("https://api.example.com".to_string());
        let client = RestClient::new(&globals).unwrap();

        assert!(client.session_token().is_none());
        assert_eq!(client.api_url, "https://api.example.com");
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_debug_masks_api_key() {
        let mut globals = GlobalArgs::new("https://api.example.com".to_string());
        globals.api_key = Some(SecretString::from("super-secret".to_string()));

        let client = RestClient::new(&globals).unwrap();
        let rendered = format!("{client:?}");

        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_session_token_round_trip() {
        let globals = GlobalArgs::new("https://api.example.com".to_string());
        let client = RestClient::new(&globals).unwrap();

        client.store_session_token(Some(SecretString::from("token".to_string())));
        assert!(client.session_token().is_some());

        client.store_session_token(None);
        assert!(client.session_token().is_none());
    }

    #[test]
    fn test_api_error_message() {
        let json: Value = serde_json::json!({"message": "boom"});
        assert_eq!(api_error_message(&json), "boom");

        let empty = Value::default();
        assert_eq!(api_error_message(&empty), "");
    }

    #[tokio::test]
    async fn test_create_account_created_returns_the_account() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users"))
            .and(header("X-Api-Key", "key-123"))
            .and(body_json(json!({
                "name": "Alice",
                "username": "alice",
                "email": "alice@example.com",
                "password": "long enough"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "account-1"
            })))
            .mount(&server)
            .await;

        let mut globals = GlobalArgs::new(server.uri());
        globals.api_key = Some(SecretString::from("key-123".to_string()));
        let client = RestClient::new(&globals)?;

        let account = client
            .create_account(&signup_fields())
            .await?
            .ok_or_else(|| anyhow!("expected an account"))?;
        assert_eq!(account.id, "account-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_conflict_returns_none() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "email already registered"
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;

        let account = client.create_account(&signup_fields()).await?;
        assert!(account.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_errors_on_failure_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "message": "directory unavailable"
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;

        let err = client
            .create_account(&signup_fields())
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("directory unavailable"));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_ok_stores_the_session_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sessions"))
            .and(body_json(json!({
                "email": "alice@example.com",
                "password": "long enough"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "session-token-1"
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;

        let session = client
            .sign_in(&credentials())
            .await?
            .ok_or_else(|| anyhow!("expected a session"))?;
        assert_eq!(session.token, "session-token-1");

        let token = client
            .session_token()
            .ok_or_else(|| anyhow!("expected a stored token"))?;
        assert_eq!(token.expose_secret(), "session-token-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_unauthorized_clears_the_session_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sessions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "invalid credentials"
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;
        client.store_session_token(Some(SecretString::from("stale".to_string())));

        let session = client.sign_in(&credentials()).await?;
        assert!(session.is_none());
        assert!(client.session_token().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_errors_on_failure_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sessions"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({
                "message": "bad gateway"
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;

        let err = client
            .sign_in(&credentials())
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("bad gateway"));
        Ok(())
    }

    #[tokio::test]
    async fn test_is_authenticated_false_without_token() -> Result<()> {
        let client = RestClient::new(&GlobalArgs::new("https://api.example.com".to_string()))?;
        assert!(!client.is_authenticated().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_is_authenticated_presents_the_bearer_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/sessions/current"))
            .and(header("Authorization", "Bearer session-token-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;
        client.store_session_token(Some(SecretString::from("session-token-1".to_string())));

        assert!(client.is_authenticated().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_is_authenticated_false_when_the_session_is_rejected() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/sessions/current"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = RestClient::new(&GlobalArgs::new(server.uri()))?;
        client.store_session_token(Some(SecretString::from("expired".to_string())));

        assert!(!client.is_authenticated().await);
        Ok(())
    }
}
