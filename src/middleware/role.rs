use crate::common::response::ApiError;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::UserRole;
use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Operations a route group can be gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create, update and delete anime and episodes.
    ManageCatalog,
    /// Upload covers, thumbnails and videos.
    UploadMedia,
    /// Edit site settings and upload the site logo.
    ManageSite,
    /// List users and change their roles.
    ManageUsers,
}

impl Capability {
    fn denial(&self) -> &'static str {
        match self {
            Capability::ManageCatalog | Capability::UploadMedia => {
                "Forbidden: staff or admin access required"
            }
            Capability::ManageSite | Capability::ManageUsers => "Forbidden: admin access required",
        }
    }
}

impl UserRole {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            UserRole::Admin => &[
                Capability::ManageCatalog,
                Capability::UploadMedia,
                Capability::ManageSite,
                Capability::ManageUsers,
            ],
            UserRole::Staff => &[Capability::ManageCatalog, Capability::UploadMedia],
            UserRole::User => &[],
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Runs after `auth_middleware`; the capability is supplied as middleware state.
pub async fn require_capability(
    State(capability): State<Capability>,
    Extension(user): Extension<AuthUser>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.role.can(capability) {
        warn!(
            user_id = user.id,
            role = %user.role,
            ?capability,
            "Denied request lacking capability"
        );
        return Err(ApiError::Forbidden(capability.denial().to_string()));
    }

    Ok(next.run(req).await)
}
