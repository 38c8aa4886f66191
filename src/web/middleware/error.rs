use poem::error::{
    MethodNotAllowedError, NotFoundError, ParseCookieError, ParseFormError, ParseJsonError,
    ParsePathError, ParseQueryError,
};
use poem::http::{StatusCode, Uri};
use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};
use serde_json::json;

use crate::prelude::*;

/// Turns the unhandled errors into plain status responses.
///
/// API routes get a JSON body so that clients always receive well-formed JSON.
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
                Ok(respond(&uri, StatusCode::NOT_FOUND))
            }
            Err(error) if error.is::<MethodNotAllowedError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(respond(&uri, StatusCode::METHOD_NOT_ALLOWED))
            }
            Err(error) => {
                if error.is::<ParseQueryError>()
                    || error.is::<ParsePathError>()
                    || error.is::<ParseCookieError>()
                    || error.is::<ParseFormError>()
                    || error.is::<ParseJsonError>()
                {
                    info!(?method, ?uri, "{:#}", error);
                    Ok(respond(&uri, StatusCode::BAD_REQUEST))
                } else {
                    error!(?method, ?uri, "{:#}", error);
                    Ok(respond(&uri, StatusCode::INTERNAL_SERVER_ERROR))
                }
            }
            result => result,
        }
    }
}

fn respond(uri: &Uri, status: StatusCode) -> Response {
    if uri.path().starts_with("/api/") {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        Json(json!({ "error": reason }))
            .with_status(status)
            .into_response()
    } else {
        status.into_response()
    }
}
