use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The authenticated caller of the current request, as established by
/// [`crate::auth::AuthGuard`]. Request-scoped; dropped with the request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

/// Looks up the authenticated identity from the request's extensions.
///
/// Returns `None` when the access guard did not run (or rejected the
/// request). The `Option` is the presence flag: user id 0 is a valid
/// identity and is never confused with "not authenticated".
pub fn identity(req: &HttpRequest) -> Option<Identity> {
    req.extensions().get::<Claims>().map(|claims| Identity {
        user_id: claims.sub,
        email: claims.email.clone(),
    })
}

/// Extractor form of [`identity`] for use in handler signatures on routes
/// protected by the guard. Fails with 401 when no identity is attached.
impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match identity(req) {
            Some(who) => ready(Ok(who)),
            // Only reachable when a handler is registered outside the
            // guard's scope; refusing the request is the safe default.
            None => ready(Err(AppError::Unauthorized(
                "User is not authenticated".to_string(),
            )
            .into())),
        }
    }
}
