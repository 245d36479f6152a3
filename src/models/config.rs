use serde::Deserialize;

/// Runtime settings for the `recsite` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Apply pending embedded migrations on start.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

impl AppConfig {
    /// Loads `config/default.yaml`, then `config/{APP_ENV}.yaml`, then `APP__*`
    /// environment variables, later sources overriding earlier ones.
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{environment}")).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
