use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    DataDirectory,
    PublicDirectory,
    JwtSecret,
    JwtTtlHours,
    MaxUploadBytes,
    AdminUsername,
    AdminEmail,
    AdminPassword,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::DataDirectory => "DATA_DIRECTORY",
            EnvKey::PublicDirectory => "PUBLIC_DIRECTORY",
            EnvKey::JwtSecret => "JWT_SECRET",
            EnvKey::JwtTtlHours => "JWT_TTL_HOURS",
            EnvKey::MaxUploadBytes => "MAX_UPLOAD_BYTES",
            EnvKey::AdminUsername => "ADMIN_USERNAME",
            EnvKey::AdminEmail => "ADMIN_EMAIL",
            EnvKey::AdminPassword => "ADMIN_PASSWORD",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

/// Unset and empty variables both read as `None`.
pub fn get_opt(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
