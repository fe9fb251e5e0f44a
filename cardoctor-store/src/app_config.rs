use serde::Deserialize;
use std::env;

const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "https://auth-moha-milon-a28c8.web.app",
    "https://auth-moha-milon-a28c8.firebaseapp.com",
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `production` selects the cross-site, secure-only cookie profile.
    pub environment: String,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub name: String,
    pub max_connections: u32,
    /// JSON array of service documents loaded when running without a database.
    pub catalog_seed: Option<String>,
}

impl DatabaseConfig {
    /// Explicit `url` wins; otherwise one is assembled from the credentials.
    /// `None` means no database is configured.
    pub fn connection_url(&self) -> Option<String> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.is_empty()) {
            return Some(url.clone());
        }
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => Some(format!(
                "postgres://{}:{}@{}/{}",
                user, password, self.host, self.name
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    pub token_lifetime_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            .set_default("server.environment", run_mode.clone())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // CARDOCTOR__AUTH__ACCESS_TOKEN_SECRET=... sets auth.access_token_secret
            .add_source(
                config::Environment::with_prefix("CARDOCTOR")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            // Plain variables used by existing deployments
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("server.environment", env::var("NODE_ENV").ok())?
            .set_override_option("auth.access_token_secret", env::var("ACCESS_TOKEN_SECRET").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("database.user", env::var("DB_USER").ok())?
            .set_override_option("database.password", env::var("DB_PASS").ok())?
            .build()?;

        s.try_deserialize()
    }

    /// Built-in values for every key except the signing secret.
    pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.port", 5000)?
            .set_default("server.environment", "development")?
            .set_default("server.allowed_origins", DEFAULT_ALLOWED_ORIGINS.to_vec())?
            .set_default("database.host", "localhost:5432")?
            .set_default("database.name", "carDoctor")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.token_lifetime_seconds", 3600)
    }
}
