use haven_interfaces::AuthUser;
use haven_web::{ApiResponse, CurrentUser};
use tracing::info;

/// `GET /api/account`: the signed-in identity, `401` without a session
pub async fn get_account(CurrentUser(user): CurrentUser) -> ApiResponse<AuthUser> {
    info!(user_id = %user.id, "Fetching account");
    ApiResponse::ok(user)
}
