//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_STORAGE_DIR, DEFAULT_STORAGE_PUBLIC_URL, MIN_JWT_SECRET_LENGTH,
};

/// How image attachments are persisted on their records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageEncoding {
    /// Upload to object storage and keep the download URL
    #[default]
    ObjectStorage,
    /// Keep the image inline as a `data:` URL
    Inline,
}

impl FromStr for ImageEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "storage" | "object-storage" => Ok(ImageEncoding::ObjectStorage),
            "inline" | "base64" => Ok(ImageEncoding::Inline),
            other => Err(format!("unknown image encoding '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub storage_dir: String,
    pub storage_public_url: String,
    pub image_encoding: ImageEncoding,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_dir", &self.storage_dir)
            .field("storage_public_url", &self.storage_public_url)
            .field("image_encoding", &self.image_encoding)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is missing in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let image_encoding = match env::var("IMAGE_ENCODING") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to object storage", e);
                ImageEncoding::ObjectStorage
            }),
            Err(_) => ImageEncoding::ObjectStorage,
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            storage_dir: env::var("STORAGE_DIR")
                .unwrap_or_else(|_| DEFAULT_STORAGE_DIR.to_string()),
            storage_public_url: env::var("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|_| DEFAULT_STORAGE_PUBLIC_URL.to_string()),
            image_encoding,
        }
    }

    /// Development defaults pointed at the given database, no environment lookup.
    pub fn local(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: "dev-secret-key-minimum-32-chars!!".to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            storage_dir: DEFAULT_STORAGE_DIR.to_string(),
            storage_public_url: DEFAULT_STORAGE_PUBLIC_URL.to_string(),
            image_encoding: ImageEncoding::ObjectStorage,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_encoding_parsing() {
        assert_eq!("storage".parse::<ImageEncoding>(), Ok(ImageEncoding::ObjectStorage));
        assert_eq!("INLINE".parse::<ImageEncoding>(), Ok(ImageEncoding::Inline));
        assert_eq!("base64".parse::<ImageEncoding>(), Ok(ImageEncoding::Inline));
        assert!("s3".parse::<ImageEncoding>().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::local("sqlite::memory:");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("dev-secret-key"));
        assert!(!rendered.contains("sqlite::memory:"));
    }
}
