use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Number of users returned per listing page. Not configurable.
pub const PAGE_SIZE: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub listing: ListingConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Listing shape. Same in every environment and never read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub page_size: i64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub auth_username: String,
    #[serde(skip_serializing)]
    pub auth_password: String,
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("BIND_ADDRESS") {
            self.server.bind_address = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("AUTH_USERNAME") {
            self.security.auth_username = v;
        }
        if let Ok(v) = env::var("AUTH_PASSWORD") {
            self.security.auth_password = v;
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite://storage.db".to_string(),
                max_connections: 5,
            },
            listing: ListingConfig::default(),
            security: SecurityConfig {
                jwt_secret: "very-very-secret-key".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                auth_username: "admin".to_string(),
                auth_password: "123".to_string(),
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite://storage.db".to_string(),
                max_connections: 10,
            },
            listing: ListingConfig::default(),
            // Secrets have no staging default; they must come from the environment
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                auth_username: "admin".to_string(),
                auth_password: String::new(),
                enable_cors: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://storage.db".to_string(),
                max_connections: 20,
            },
            listing: ListingConfig::default(),
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                auth_username: "admin".to_string(),
                auth_password: String::new(),
                enable_cors: false,
            },
        }
    }

    /// Bind address in `host:port` form
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.security.auth_username, "admin");
        assert!(!config.security.jwt_secret.is_empty());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.listing.page_size, 5);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert!(config.security.auth_password.is_empty());
        assert!(!config.security.enable_cors);
        assert_eq!(config.security.jwt_expiry_hours, 4);
        assert_eq!(config.listing.page_size, PAGE_SIZE);
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let value = serde_json::to_value(AppConfig::development()).unwrap();
        assert!(value["security"].get("jwt_secret").is_none());
        assert!(value["security"].get("auth_password").is_none());
        assert_eq!(value["security"]["auth_username"], "admin");
    }
}
