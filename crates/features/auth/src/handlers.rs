use crate::model::{AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::{Accounts, service};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use lobby_database::Database;
use lobby_derive::api_handler;
use lobby_domain::constants::AUTH_TAG;
use lobby_kernel::security::token::TokenService;
use lobby_kernel::server::{AdminSession, ApiError, ErrorBody, Payload, Slice};

/// Exchanges credentials for a bearer token.
#[api_handler(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Authenticated", body = LoginResponse),
        (status = BAD_REQUEST, description = "Missing username or password", body = ErrorBody),
        (status = UNAUTHORIZED, description = "Invalid username or password", body = ErrorBody),
    ),
    tag = AUTH_TAG,
)]
pub async fn login(
    State(db): State<Database>,
    State(tokens): State<TokenService>,
    Slice(accounts): Slice<Accounts>,
    Payload(request): Payload<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let admin =
        service::authenticate(&db, accounts.decoy_hash(), &request.username, &request.password).await?;
    let issued = tokens.issue(&admin.id, &admin.name)?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_owned(),
        expires_in: issued.expires_in,
        admin,
    }))
}

/// Profile of the calling admin.
#[api_handler(
    get,
    path = "/auth/me",
    responses(
        (status = OK, description = "Current admin", body = AdminProfile),
        (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = AUTH_TAG,
)]
pub async fn me(session: AdminSession, State(db): State<Database>) -> Result<Json<AdminProfile>, ApiError> {
    Ok(Json(service::profile(&db, &session.id).await?))
}

/// Creates another admin account.
#[api_handler(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = CREATED, description = "Account created", body = AdminProfile),
        (status = BAD_REQUEST, description = "Invalid username, password or name", body = ErrorBody),
        (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
        (status = CONFLICT, description = "Username taken", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = AUTH_TAG,
)]
pub async fn register(
    session: AdminSession,
    Slice(accounts): Slice<Accounts>,
    State(db): State<Database>,
    Payload(request): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<AdminProfile>), ApiError> {
    let created = service::register(&db, accounts.password_cost(), request).await?;
    tracing::debug!(admin = %session.id, created = %created.id, "Registration performed");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Changes the calling admin's password.
#[api_handler(
    put,
    path = "/auth/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = NO_CONTENT, description = "Password changed"),
        (status = BAD_REQUEST, description = "Wrong current password or weak new password", body = ErrorBody),
        (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = AUTH_TAG,
)]
pub async fn change_password(
    session: AdminSession,
    Slice(accounts): Slice<Accounts>,
    State(db): State<Database>,
    Payload(request): Payload<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    service::change_password(
        &db,
        accounts.password_cost(),
        &session.id,
        &request.current_password,
        &request.new_password,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
