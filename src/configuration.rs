use crate::health::Target;

pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub prober: ProberSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProberSettings {
    pub timeout_ms: u64,
    pub user_agent: String,
    #[serde(default)]
    pub targets: Vec<Target>,
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    load_configuration("configuration")
}

/// Defaults, then the optional `<name>.{yaml,json,toml}` file, then
/// `STATUS__*` environment overrides (e.g. `STATUS__PROBER__TIMEOUT_MS`).
pub fn load_configuration(name: &str) -> Result<Settings, config::ConfigError> {
    build_configuration(name, status_environment())
}

fn status_environment() -> config::Environment {
    config::Environment::with_prefix("STATUS")
        .prefix_separator("__")
        .separator("__")
}

fn build_configuration(
    name: &str,
    environment: config::Environment,
) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", 8000)?
        .set_default("prober.timeout_ms", DEFAULT_TIMEOUT_MS as i64)?
        .set_default("prober.user_agent", default_user_agent())?
        .add_source(config::File::with_name(name).required(false))
        .add_source(environment)
        .build()?;

    settings.try_deserialize()
}
