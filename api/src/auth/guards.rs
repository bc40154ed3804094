use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

// --- Role Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate the user from the request and insert the
/// claims back into the request extensions for handlers to use.
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Base guard for role checks. A token carrying a role the platform does not
/// know is denied rather than treated as any particular role.
async fn allow_roles(
    req: Request<Body>,
    next: Next,
    allowed: &[Role],
    failure_msg: &str,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    match user.0.role.parse::<Role>() {
        Ok(role) if allowed.contains(&role) => Ok(next.run(req).await),
        _ => Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg)))),
    }
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Student-only guard. Enrollment, submissions and progress writes belong to
/// students; instructors and admins read the analytics side instead.
pub async fn allow_student(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(req, next, &[Role::Student], "Student access required").await
}

/// Guard for instructors and admins.
pub async fn allow_instructor_or_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        req,
        next,
        &[Role::Instructor, Role::Admin],
        "Instructor or admin access required",
    )
    .await
}

/// Admin-only guard.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(req, next, &[Role::Admin], "Admin access required").await
}
