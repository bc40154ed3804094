use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use services::ServiceError;

use crate::response::ApiResponse;

/// Maps a service error onto the HTTP status the API reports for it.
///
/// Validation failures map to `422` so they are distinguishable from
/// requests that never parsed in the first place.
pub fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Standard error arm for handlers that call into the services.
///
/// Database errors are logged here so individual handlers do not have to.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    if let ServiceError::Db(ref db_err) = err {
        tracing::error!(error = %db_err, "service call failed");
    }
    (error_status(&err), Json(ApiResponse::error(err.to_string())))
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::models::user::Model> for UserResponse {
    fn from(user: db::models::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
