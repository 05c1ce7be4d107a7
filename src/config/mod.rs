use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        };

        // Environment picks the defaults, specific env vars override them
        match environment {
            Environment::Production => Self::production(),
            Environment::Test => Self::test(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/mivideoteca".to_string(),
                max_connections: 10,
            },
            security: SecurityConfig {
                // Dev-only fallback; JWT_SECRET must be set outside development
                jwt_secret: "dev-secret-no-usar-en-produccion".to_string(),
                jwt_expiry_hours: 24 * 7,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn test() -> Self {
        Self {
            environment: Environment::Test,
            server: ServerConfig { port: 0 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 2,
            },
            security: SecurityConfig {
                jwt_secret: "test-secret".to_string(),
                jwt_expiry_hours: 1,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
