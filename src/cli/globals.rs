use secrecy::SecretString;

/// Configuration shared by every action.
#[derive(Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub api_key: Option<SecretString>,
    pub timeout: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            api_key: None,
            timeout: 30,
        }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
