use poem::{Endpoint, Middleware, Request, Response, Result};

use crate::helpers::tracing::format_elapsed;
use crate::prelude::*;

/// Logs every request with its status and duration.
pub struct TimeItMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for TimeItMiddleware {
    type Output = TimeItMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TimeItMiddlewareImpl { ep }
    }
}

pub struct TimeItMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for TimeItMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let start_instant = Instant::now();
        let response = self.ep.call(request).await;
        let status = response.as_ref().map(Response::status).ok();
        info!(
            elapsed = format_elapsed(start_instant).as_str(),
            ?method,
            path = path.as_str(),
            ?status,
        );
        response
    }
}
