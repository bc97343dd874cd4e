use crate::config::env::{self, EnvKey};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

#[derive(Clone, Debug, Deserialize)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub data_directory: PathBuf,
    pub public_directory: Option<PathBuf>,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub max_upload_bytes: u64,
    pub admin_seed: Option<AdminSeed>,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        let data_directory = PathBuf::from(env::get_or(EnvKey::DataDirectory, "./data"));
        let default_db = format!(
            "sqlite://{}?mode=rwc",
            data_directory.join("database.sqlite").display()
        );

        let admin_seed = match (
            env::get_opt(EnvKey::AdminUsername),
            env::get_opt(EnvKey::AdminEmail),
            env::get_opt(EnvKey::AdminPassword),
        ) {
            (Some(username), Some(email), Some(password)) => Some(AdminSeed {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3001),
            database_url: env::get_or(EnvKey::DatabaseUrl, &default_db),
            public_directory: env::get_opt(EnvKey::PublicDirectory).map(PathBuf::from),
            jwt_secret: env::get(EnvKey::JwtSecret)?,
            jwt_ttl_hours: env::get_parsed(EnvKey::JwtTtlHours, 24),
            max_upload_bytes: env::get_parsed(EnvKey::MaxUploadBytes, DEFAULT_MAX_UPLOAD_BYTES),
            admin_seed,
            data_directory,
        })
    }

    pub fn uploads_directory(&self) -> PathBuf {
        self.data_directory.join("uploads")
    }
}
