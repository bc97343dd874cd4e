pub mod extract;
pub mod response;
pub mod security;
pub mod upload;
pub mod validation;
