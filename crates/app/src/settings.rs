//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` in the working directory, then overridden by
//! `FINANCAS__*` environment variables (e.g. `FINANCAS__SERVER__PORT=8080`).
//!
//! See `settings.toml` for an example.
use config::{Config, ConfigError, Environment, File};
use engine::StatusTransitionPolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    /// Path of the database file, created if missing.
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: Option<String>,
    pub port: u16,
    #[serde(default)]
    pub status_policy: StatusTransitionPolicy,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::with_name("settings").required(false)))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .add_source(
                Environment::with_prefix("FINANCAS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
            .unwrap()
    }

    #[test]
    fn server_section_is_optional() {
        let settings = parse("");
        assert_eq!(settings.app.level, "info");
        assert!(settings.server.is_none());
    }

    #[test]
    fn reads_sqlite_server() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            database = { sqlite = "financas.db" }
            port = 3000
            status_policy = "skip_validation"
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.database, Database::Sqlite("financas.db".to_string()));
        assert_eq!(server.port, 3000);
        assert_eq!(server.bind, None);
        assert_eq!(server.status_policy, StatusTransitionPolicy::SkipValidation);
    }

    #[test]
    fn status_policy_defaults_to_revalidate() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            port = 3000
            "#,
        );
        let server = settings.server.unwrap();
        assert_eq!(server.database, Database::Memory);
        assert_eq!(server.status_policy, StatusTransitionPolicy::Revalidate);
    }
}
