use anyhow::Context;

/// The deployment environment, selected by the `ENVIRONMENT` variable.
/// Anything unrecognized is treated as production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Develop,
    Production,
}

impl Environment {
    pub fn new_or_prod() -> Self {
        Self::from_name(std::env::var("ENVIRONMENT").ok().as_deref())
    }

    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("local") => Environment::Local,
            Some("develop") => Environment::Develop,
            _ => Environment::Production,
        }
    }
}

/// Configuration parameters for the application.
#[derive(Debug)]
pub struct Config {
    /// The connection URL for the listings Postgres database.
    pub database_url: String,
    /// The port to listen for HTTP requests on.
    pub port: usize,
    /// The environment we are in
    pub environment: Environment,
    /// Base URL of the auth service used for token introspection.
    pub auth_service_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be provided")?;
        let port = std::env::var("PORT")
            .unwrap_or("8080".to_string())
            .parse::<usize>()
            .context("PORT must be a number")?;
        let environment = Environment::new_or_prod();
        let auth_service_url =
            std::env::var("AUTH_SERVICE_URL").context("AUTH_SERVICE_URL must be provided")?;

        Ok(Config {
            database_url,
            port,
            environment,
            auth_service_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_environment_defaults_to_production() {
        assert_eq!(Environment::from_name(Some("local")), Environment::Local);
        assert_eq!(Environment::from_name(Some("develop")), Environment::Develop);
        assert_eq!(Environment::from_name(Some("staging")), Environment::Production);
        assert_eq!(Environment::from_name(None), Environment::Production);
    }
}
