use crate::config::SecurityConfig;

/// Identity established by a successful credential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

/// Source of truth for username/password pairs
pub trait CredentialStore: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<Principal>;
}

/// A single username/password pair taken from configuration
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.auth_username, &security.auth_password)
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<Principal> {
        // An unset password never matches, even an empty one
        if self.password.is_empty() {
            return None;
        }
        if username == self.username && password == self.password {
            Some(Principal { username: username.to_string() })
        } else {
            None
        }
    }
}
