use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// The caller resolved from the bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
}

impl CurrentUser {
    /// Employee-scoped routes act on the caller unless another id is given.
    pub fn resolve_employee(&self, requested: Option<String>) -> String {
        requested
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// `?employeeId=` on employee-scoped lists; absent means the caller.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilter {
    pub employee_id: Option<String>,
}

/// Rejects requests without a known `Authorization: Bearer <token>` header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AppError::Unauthorized)?;

    let user_id = state
        .config
        .api_tokens
        .get(token)
        .ok_or(AppError::Unauthorized)?;

    debug!(user_id = %user_id, path = %request.uri().path(), "authenticated request");
    request.extensions_mut().insert(CurrentUser {
        id: user_id.clone(),
    });
    Ok(next.run(request).await)
}

/// GET /api/auth/user
pub async fn current_user_handler(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_employee_defaults_to_caller() {
        let user = CurrentUser {
            id: "emp-7".to_string(),
        };
        assert_eq!(user.resolve_employee(None), "emp-7");
        assert_eq!(user.resolve_employee(Some("  ".to_string())), "emp-7");
        assert_eq!(user.resolve_employee(Some("emp-9".to_string())), "emp-9");
    }
}
