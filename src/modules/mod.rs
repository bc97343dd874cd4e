pub mod anime;
pub mod auth;
pub mod episode;
pub mod settings;
pub mod upload;
pub mod users;
