//! Access guard middleware.
//!
//! Gates every request on the scopes it wraps: extracts the `Bearer` token
//! from the `Authorization` header, verifies it with the token codec, and
//! on success inserts the decoded [`Claims`] into the request's extensions
//! for downstream handlers. Any failure short-circuits the request with
//! 401 before the handler runs.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::config::AuthConfig;
use crate::error::AppError;

pub struct AuthGuard {
    config: AuthConfig,
}

impl AuthGuard {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct AuthGuardService<S> {
    service: S,
    config: AuthConfig,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok());

        let header = match header {
            Some(value) => value,
            None => {
                return reject(AppError::Unauthorized(
                    "Authentication token not provided".into(),
                ))
            }
        };

        // Credential must be exactly "Bearer <token>"; any other shape
        // (wrong scheme, extra segments) is refused.
        let parts: Vec<&str> = header.split(' ').collect();
        if parts.len() != 2 || parts[0] != "Bearer" {
            return reject(AppError::Unauthorized(
                "Invalid authorization header format".into(),
            ));
        }

        match verify_token(parts[1], &self.config) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(app_err) => reject(app_err),
        }
    }
}

fn reject<B: 'static>(err: AppError) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>> {
    Box::pin(async move { Err(err.into()) })
}
