//! Account HTTP handlers.
//!
//! ```text
//! POST /api/login {"email":"ada@example.com","password":"secret1"}
//! POST /api/register {"email":"ada@example.com","password":"secret1"}
//! POST /api/logout
//! GET /api/user
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde_json::Value;

use crate::domain::{Credentials, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CredentialsRequest, UserResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::UserSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_credentials;

fn credentials_from(
    payload: Result<web::Json<CredentialsRequest>, actix_web::Error>,
) -> Result<Credentials, Error> {
    let body = payload.map_err(Error::from)?.into_inner();
    parse_credentials(body.email.as_ref(), body.password.as_ref())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (
            status = 200,
            description = "Signed-in user",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = UserResponse
        ),
        (status = 400, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Wrong password for an existing account", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: UserSession,
    payload: Result<web::Json<CredentialsRequest>, actix_web::Error>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = credentials_from(payload)?;
    let user = state.login.authenticate(&credentials).await?;
    session.sign_in(user.id())?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (
            status = 200,
            description = "Registered user",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = UserResponse
        ),
        (status = 400, description = "Invalid or duplicate e-mail", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: UserSession,
    payload: Result<web::Json<CredentialsRequest>, actix_web::Error>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = credentials_from(payload)?;
    let user = state.registration.register(&credentials).await?;
    session.sign_in(user.id())?;
    Ok(web::Json(UserResponse::from(user)))
}

/// End the current session. Succeeds whether or not anyone was signed in.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 200, description = "Session cleared; body is `null`")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: UserSession) -> HttpResponse {
    session.sign_out();
    HttpResponse::Ok().json(Value::Null)
}

/// Return the signed-in user, or `null` for anonymous callers.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Signed-in user or `null`", body = UserResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security([])
)]
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: UserSession,
) -> ApiResult<web::Json<Option<UserResponse>>> {
    let Some(user_id) = session.signed_in_user()? else {
        return Ok(web::Json(None));
    };
    let user = state.current_user.current_user(user_id).await?;
    Ok(web::Json(user.map(UserResponse::from)))
}
