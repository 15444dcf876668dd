use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Actor;
use crate::services::IdentityDirectory;

/// Extracts the authenticated [`Actor`] for the current request.
///
/// Intended for routes behind `AuthMiddleware`, which verifies the JWT and stores its
/// [`Claims`] in the request extensions. The claims' email is resolved through the
/// [`IdentityDirectory`], so a token for an account that no longer exists is rejected
/// with `AppError::Unauthorized`.
impl FromRequest for Actor {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let directory = req.app_data::<web::Data<IdentityDirectory>>().cloned();

        Box::pin(authenticate(claims, directory))
    }
}

async fn authenticate(
    claims: Option<Claims>,
    directory: Option<web::Data<IdentityDirectory>>,
) -> Result<Actor, ActixError> {
    let claims = claims.ok_or_else(|| {
        AppError::Unauthorized("Claims not found in request. Ensure AuthMiddleware is active.".into())
    })?;
    let directory = directory.ok_or_else(|| {
        log::error!("IdentityDirectory is not registered as app data");
        AppError::InternalServerError("Identity directory unavailable".into())
    })?;

    match directory
        .resolve_actor(&claims.email)
        .await
        .map_err(AppError::from)?
    {
        Some(actor) => Ok(actor),
        None => {
            log::warn!("Token for unknown user {} rejected", claims.sub);
            Err(AppError::Unauthorized("User no longer exists".into()).into())
        }
    }
}
