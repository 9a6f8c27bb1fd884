//! Account endpoints

use crate::core::models::{ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::server::middleware::Identity;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use tracing::info;

/// Mount `/api/v1/user`
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/api/v1/user")
            .service(
                web::resource("/register")
                    .wrap(state.ip_admission())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/login")
                    .wrap(state.ip_admission())
                    .route(web::post().to(login)),
            )
            .route("/refresh", web::post().to(refresh))
            .service(
                web::resource("/password")
                    .wrap(state.auth_middleware())
                    .route(web::put().to(change_password)),
            )
            .service(
                web::resource("/profile")
                    .wrap(state.auth_middleware())
                    .route(web::get().to(profile)),
            ),
    );
}

pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    info!("Registration attempt");
    let profile = state.users.register(&request.phone, &request.password).await?;
    Ok(ApiResponse::success("Registered", profile).to_http_response())
}

pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let login = state.users.login(&request.phone, &request.password).await?;
    Ok(ApiResponse::success("Login successful", login).to_http_response())
}

pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse> {
    let refreshed = state.users.refresh(&request.refresh_token)?;
    Ok(ApiResponse::success("Token refreshed", refreshed).to_http_response())
}

pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    let user_id = identity.user_id()?;
    state
        .users
        .change_password(user_id, &request.old_password, &request.new_password)
        .await?;
    Ok(ApiResponse::message("Password changed").to_http_response())
}

pub async fn profile(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse> {
    let profile = state.users.profile(identity.user_id()?).await?;
    Ok(ApiResponse::success("Success", profile).to_http_response())
}
