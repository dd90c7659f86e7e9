use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use lanewright_core::AppError;
use tracing_subscriber::EnvFilter;

const MIN_WORKER_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub worker_shared_secret: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let worker_shared_secret = required_non_empty_env("WORKER_SHARED_SECRET")?;
        validate_worker_secret(worker_shared_secret.as_str())?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match env::var("API_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            Err(_) => 3001,
        };

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            worker_shared_secret,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn validate_worker_secret(secret: &str) -> Result<(), AppError> {
    if secret.len() < MIN_WORKER_SECRET_LENGTH {
        return Err(AppError::Validation(format!(
            "WORKER_SHARED_SECRET must be at least {MIN_WORKER_SECRET_LENGTH} characters"
        )));
    }

    Ok(())
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
