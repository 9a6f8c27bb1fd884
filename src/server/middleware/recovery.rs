//! Panic recovery middleware

use crate::utils::error::{ErrorCode, ErrorResponse};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpRequest, HttpResponse};
use futures::FutureExt;
use futures::future::{Ready, ready};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::rc::Rc;
use tracing::error;

/// Turns a panic anywhere below it into a 500 envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RecoveryMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RecoveryMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoveryMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for recovery middleware
pub struct RecoveryMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RecoveryMiddlewareService<S>
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
        let http_req = req.request().clone();
        let service = self.service.clone();

        Box::pin(async move {
            let outcome = match std::panic::catch_unwind(AssertUnwindSafe(|| service.call(req))) {
                Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
                Err(panic) => Err(panic),
            };

            match outcome {
                Ok(res) => Ok(res?.map_into_left_body()),
                Err(panic) => Ok(recovered(http_req, panic.as_ref())),
            }
        })
    }
}

fn recovered<B>(req: HttpRequest, panic: &(dyn Any + Send)) -> ServiceResponse<EitherBody<B>> {
    error!(
        method = %req.method(),
        path = %req.path(),
        panic = %panic_message(panic),
        "Panic recovered"
    );

    let response = HttpResponse::InternalServerError()
        .json(ErrorResponse::from_code(ErrorCode::InternalError));
    ServiceResponse::new(req, response).map_into_right_body()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
