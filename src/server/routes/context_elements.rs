//! Context element endpoints

use crate::core::models::{ElementContent, ElementQuery};
use crate::server::middleware::Identity;
use crate::server::routes::{ApiResponse, PageResponse};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

/// Mount `/api/v1/context-elements`
///
/// Authentication runs before the user scoped gate so the gate can key on
/// the caller.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/api/v1/context-elements")
            .wrap(state.user_admission())
            .wrap(state.auth_middleware())
            .service(
                web::resource(["", "/"])
                    .route(web::post().to(create))
                    .route(web::get().to(list)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get))
                    .route(web::put().to(update))
                    .route(web::delete().to(delete)),
            ),
    );
}

pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    content: web::Json<ElementContent>,
) -> Result<HttpResponse> {
    let element = state
        .elements
        .create(identity.user_id()?, content.into_inner())
        .await?;
    Ok(ApiResponse::success("Created", element).to_http_response())
}

pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ElementQuery>,
) -> Result<HttpResponse> {
    let (items, query, total) = state
        .elements
        .list(identity.user_id()?, query.into_inner())
        .await?;
    Ok(PageResponse::new("Success", items, total, query.page, query.size).to_http_response())
}

pub async fn get(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<u64>,
) -> Result<HttpResponse> {
    let element = state.elements.get(identity.user_id()?, id.into_inner()).await?;
    Ok(ApiResponse::success("Success", element).to_http_response())
}

pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<u64>,
    patch: web::Json<ElementContent>,
) -> Result<HttpResponse> {
    let element = state
        .elements
        .update(identity.user_id()?, id.into_inner(), patch.into_inner())
        .await?;
    Ok(ApiResponse::success("Updated", element).to_http_response())
}

pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<u64>,
) -> Result<HttpResponse> {
    state.elements.delete(identity.user_id()?, id.into_inner()).await?;
    Ok(ApiResponse::message("Deleted").to_http_response())
}
