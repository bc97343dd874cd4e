use super::dto::{UpdateRoleRequest, UserSummary};
use crate::common::response::ApiError;
use crate::modules::auth::model::UserRole;
use crate::modules::auth::repository::AuthRepository;
use crate::state::AppState;
use tracing::info;

pub struct UserService;

impl UserService {
    pub async fn list(state: AppState) -> Result<Vec<UserSummary>, ApiError> {
        let users = AuthRepository::list_users(&state.db).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    pub async fn update_role(
        state: AppState,
        id: i64,
        req: UpdateRoleRequest,
        changed_by: i64,
    ) -> Result<UserRole, ApiError> {
        let role: UserRole = req
            .role
            .parse()
            .map_err(|_| ApiError::validation("Invalid role"))?;

        if !AuthRepository::update_role(&state.db, id, role).await? {
            return Err(ApiError::not_found("User"));
        }

        info!(user_id = id, %role, changed_by, "User role updated");
        Ok(role)
    }
}
