//! Account API contracts and the implementations shipped with the crate.

pub mod memory;
pub mod rest;

use crate::flows::types::{Account, Credentials, Session, SignupFields};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Account creation and sign-in against the backend directory.
///
/// `Ok(None)` is a service-level rejection (account already exists, wrong
/// credentials); `Err` is a transport or server fault.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn create_account(&self, fields: &SignupFields) -> Result<Option<Account>>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>>;
}

/// The authoritative check for an established session.
///
/// Implementations swallow their own faults to `false`: an unverifiable
/// session is not an authenticated one.
#[async_trait]
pub trait SessionChecker: Send + Sync {
    async fn is_authenticated(&self) -> bool;
}

/// Build an endpoint URL from a configured base URL and a request path.
///
/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an
/// unsupported scheme.
pub fn endpoint_url(url: &str, path: &str) -> Result<String> {
    let url = Url::parse(url)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_endpoint_url_default_ports() {
        assert_eq!(
            endpoint_url("http://api.example.com", "/v1/users").unwrap(),
            "http://api.example.com:80/v1/users"
        );
        assert_eq!(
            endpoint_url("https://api.example.com", "/v1/sessions").unwrap(),
            "https://api.example.com:443/v1/sessions"
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_endpoint_url_explicit_port() {
        assert_eq!(
            endpoint_url("http://localhost:3000", "/v1/sessions/current").unwrap(),
            "http://localhost:3000/v1/sessions/current"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_bad_input() {
        assert!(endpoint_url("not a url", "/v1/users").is_err());
        assert!(endpoint_url("ftp://api.example.com", "/v1/users").is_err());
        assert!(endpoint_url("unix:/var/run/api.sock", "/v1/users").is_err());
    }
}
