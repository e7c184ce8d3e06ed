use poem::error::{MethodNotAllowedError, NotFoundError};
use poem::http::StatusCode;
use poem::web::Html;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::gone::GoneError;
use crate::prelude::*;
use crate::web::views::error::not_found;

/// Turns the errors into responses, page lookup failures end up with the generic «not found» page.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        match self.ep.call(request).await {
            Err(error) if error.is::<NotFoundError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(not_found_response())
            }
            Err(error) if error.is::<MethodNotAllowedError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(StatusCode::METHOD_NOT_ALLOWED.into_response())
            }
            Err(error) => match error.downcast_ref::<GoneError>() {
                Some(GoneError::PageNotFound(message) | GoneError::ForwardPageNotFound(message)) => {
                    warn!(?method, ?uri, message = message.as_str());
                    Ok(not_found_response())
                }
                _ => {
                    error!(?method, ?uri, "{:#}", error);
                    Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response())
                }
            },
            result => result,
        }
    }
}

fn not_found_response() -> Response {
    Html(not_found().into_string())
        .with_status(StatusCode::NOT_FOUND)
        .with_header("Cache-Control", "no-cache")
        .into_response()
}
