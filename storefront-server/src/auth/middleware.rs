//! Route guards

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::extractor::authenticate;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// Admin-only guard
///
/// Authenticates the bearer token and requires an `admin` or `superadmin`
/// role. The caller is left in request extensions for the handler.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();
    let user = authenticate(&mut parts, state.jwt_service())?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            user_role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
