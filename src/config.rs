use std::env;

/// Immutable authentication settings shared by the token codec and the
/// access guard. Built once at startup and cloned into the middleware;
/// never read from the environment after that.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// How long an issued token stays valid.
    pub token_ttl: chrono::Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: chrono::Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub auth: AuthConfig,
}

impl Config {
    /// Loads configuration from the environment. Panics on missing or
    /// invalid required values so the process fails fast at startup.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        if jwt_secret.len() < 10 {
            panic!("JWT_SECRET must be at least 10 characters");
        }

        let ttl_hours: i64 = env::var("JWT_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .expect("JWT_TTL_HOURS must be a number");

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            auth: AuthConfig::new(jwt_secret, chrono::Duration::hours(ttl_hours)),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
