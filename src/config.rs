pub mod env_var {
    //! Process settings, resolved once from the environment.
    //!
    //! `DATABASE_URL` wins over the `DATABASE_*` components when both are set.

    use std::str::FromStr;

    use derive_more::{Display, Error};
    use lazy_static::lazy_static;
    use tracing::Level;

    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_DATABASE_HOST: &str = "localhost";
    pub const DEFAULT_DATABASE_PORT: u16 = 5432;

    lazy_static! {
        static ref ENV_VAR: EnvVar = EnvVar::from_lookup(|key| std::env::var(key).ok())
            .unwrap_or_else(|err| panic!("Invalid environment: {err}"));
    }

    #[derive(Debug, Display, Error, PartialEq, Eq)]
    pub enum ConfigError {
        #[display(fmt = "missing env var {_0}")]
        Missing(#[error(not(source))] &'static str),
        #[display(fmt = "env var {key} has an invalid value {value:?}")]
        Invalid { key: &'static str, value: String },
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EnvVar {
        pub port: u16,
        pub log_level: Level,
        pub database_url: String,
    }

    impl EnvVar {
        /// Resolves the settings through `lookup`; empty values count as unset.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
            let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

            let port = parse_or(var("PORT"), "PORT", DEFAULT_PORT)?;
            let log_level = parse_or(var("LOG_LEVEL"), "LOG_LEVEL", Level::INFO)?;

            let database_url = match var("DATABASE_URL") {
                Some(url) => url,
                None => {
                    let host = var("DATABASE_HOST").unwrap_or_else(|| DEFAULT_DATABASE_HOST.into());
                    let port = parse_or(var("DATABASE_PORT"), "DATABASE_PORT", DEFAULT_DATABASE_PORT)?;
                    let name = var("DATABASE_NAME").ok_or(ConfigError::Missing("DATABASE_NAME"))?;
                    let user = var("DATABASE_USER").ok_or(ConfigError::Missing("DATABASE_USER"))?;
                    let password = var("DATABASE_PASSWORD")
                        .ok_or(ConfigError::Missing("DATABASE_PASSWORD"))?;

                    format!("postgres://{user}:{password}@{host}:{port}/{name}")
                }
            };

            Ok(Self {
                port,
                log_level,
                database_url,
            })
        }
    }

    fn parse_or<T: FromStr>(
        value: Option<String>,
        key: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match value {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
        }
    }

    pub fn get() -> &'static EnvVar {
        &ENV_VAR
    }

}
