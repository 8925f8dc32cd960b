//! In-memory account directory.
//!
//! Implements both API traits without any network. Used by the flow tests
//! and anywhere a deterministic backend is wanted: outcomes are canned,
//! calls are counted, and faults can be injected per method.

use crate::api::{AccountService, SessionChecker};
use crate::flows::types::{Account, Credentials, Session, SignupFields};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Clone, Debug)]
struct StoredUser {
    password: String,
    account: Account,
}

/// Shared in-memory directory; clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirectory {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    session: Arc<RwLock<Option<Session>>>,
    create_calls: Arc<AtomicUsize>,
    sign_in_calls: Arc<AtomicUsize>,
    fail_create_account: Arc<AtomicBool>,
    fail_sign_in: Arc<AtomicBool>,
    reject_sign_in: Arc<AtomicBool>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `create_account` calls seen so far.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `sign_in` calls seen so far.
    #[must_use]
    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    /// Make the next `create_account` calls fault with an error.
    pub fn fail_create_account(&self, fail: bool) {
        self.fail_create_account.store(fail, Ordering::SeqCst);
    }

    /// Make the next `sign_in` calls fault with an error.
    pub fn fail_sign_in(&self, fail: bool) {
        self.fail_sign_in.store(fail, Ordering::SeqCst);
    }

    /// Make the next `sign_in` calls come back rejected (no session),
    /// regardless of the stored credentials.
    pub fn reject_sign_in(&self, reject: bool) {
        self.reject_sign_in.store(reject, Ordering::SeqCst);
    }

    /// Drop the established session, if any.
    pub fn clear_session(&self) {
        if let Ok(mut session) = self.session.write() {
            *session = None;
        }
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.read().map(|s| s.is_some()).unwrap_or(false)
    }
}

#[async_trait]
impl AccountService for MemoryDirectory {
    async fn create_account(&self, fields: &SignupFields) -> Result<Option<Account>> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_create_account.load(Ordering::SeqCst) {
            return Err(anyhow!("account directory unavailable"));
        }

        let mut users = self
            .users
            .write()
            .map_err(|_| anyhow!("users lock poisoned"))?;

        if users.contains_key(&fields.email) {
            return Ok(None);
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
        };

        users.insert(
            fields.email.clone(),
            StoredUser {
                password: fields.password.clone(),
                account: account.clone(),
            },
        );

        Ok(Some(account))
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(anyhow!("sessions endpoint unavailable"));
        }

        if self.reject_sign_in.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let users = self
            .users
            .read()
            .map_err(|_| anyhow!("users lock poisoned"))?;

        let matches = users
            .get(&credentials.email)
            .is_some_and(|user| user.password == credentials.password);

        if !matches {
            return Ok(None);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
        };

        let mut slot = self
            .session
            .write()
            .map_err(|_| anyhow!("session lock poisoned"))?;
        *slot = Some(session.clone());

        Ok(Some(session))
    }
}

#[async_trait]
impl SessionChecker for MemoryDirectory {
    async fn is_authenticated(&self) -> bool {
        self.has_session()
    }
}
