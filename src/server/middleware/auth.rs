//! Authentication middleware

use super::helpers::extract_bearer_token;
use crate::auth::SessionTokenService;
use crate::utils::error::{AppError, AuthError};
use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Caller identity attached to the request by [`AuthMiddleware`]
///
/// Extracting it on a route without the middleware yields the anonymous
/// identity, which [`Identity::user_id`] rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: u64,
    pub phone: String,
}

impl Identity {
    /// The zero identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id != 0
    }

    /// Authenticated user id, `Unauthorized` for the zero identity
    pub fn user_id(&self) -> Result<u64, AppError> {
        if self.is_authenticated() {
            Ok(self.user_id)
        } else {
            Err(AppError::unauthorized("Authentication required"))
        }
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<Identity>()
            .cloned()
            .unwrap_or_else(Identity::anonymous)))
    }
}

/// Bearer token gate for protected routes
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<SessionTokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<SessionTokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    tokens: Arc<SessionTokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = match authenticate(&self.tokens, &req) {
            Ok(identity) => identity,
            Err(err) => {
                debug!("Rejected {} {}: {}", req.method(), req.path(), err);
                let response = AppError::Auth(err).error_response();
                return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
            }
        };

        req.extensions_mut().insert(identity);
        let service = self.service.clone();

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Verify the bearer token of `req`
///
/// Verification failures of any kind surface as `InvalidToken`.
fn authenticate(tokens: &SessionTokenService, req: &ServiceRequest) -> Result<Identity, AuthError> {
    let token = extract_bearer_token(req.headers())?;

    let claims = tokens.verify_access_token(token).map_err(|e| {
        debug!("Access token rejected: {}", e);
        AuthError::InvalidToken
    })?;

    Ok(Identity {
        user_id: claims.user_id,
        phone: claims.phone,
    })
}
