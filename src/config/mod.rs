use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::registration::DEFAULT_MAX_ATTACHMENT_BYTES;

/// Deployment stage the service believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Top-level configuration assembled from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub uploads: UploadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&env_or("APP_ENV", "development"));

        let server = ServerConfig {
            host: env_or("APP_HOST", "127.0.0.1"),
            port: env_or("APP_PORT", "3000")
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort)?,
        };

        let telemetry = TelemetryConfig {
            log_level: env_or("APP_LOG_LEVEL", "info"),
        };

        let uploads = UploadConfig {
            max_attachment_bytes: env_or(
                "APP_MAX_ATTACHMENT_BYTES",
                &DEFAULT_MAX_ATTACHMENT_BYTES.to_string(),
            )
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidAttachmentLimit)?,
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            uploads,
        })
    }
}

/// HTTP listener binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Logging controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Limits applied to supporting-document uploads.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_attachment_bytes: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("APP_MAX_ATTACHMENT_BYTES must be a byte count")]
    InvalidAttachmentLimit,
}
