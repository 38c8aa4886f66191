use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;

use crate::prelude::*;
use crate::resource::Resource;
use crate::web::state::State;

const CACHE_CONTROL: &str = "no-cache";

/// Placeholder for an error that has no description.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of a failed resource read.
#[derive(Serialize)]
struct ErrorEnvelope {
    error: &'static str,
    details: String,
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_health() -> Result<impl IntoResponse> {
    Ok(Response::from(StatusCode::NO_CONTENT).with_header("Cache-Control", CACHE_CONTROL))
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_agencies(state: Data<&State>) -> Response {
    respond_with_records(&state, Resource::Agencies).await
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_contacts(state: Data<&State>) -> Response {
    respond_with_records(&state, Resource::Contacts).await
}

/// Serves the whole CSV export as a JSON array.
///
/// Any read failure collapses into the same `500` envelope, the error kind only goes to the logs.
async fn respond_with_records(state: &State, resource: Resource) -> Response {
    match state.read(resource).await {
        Ok(records) => {
            debug!(resource = resource.name(), n_records = records.len());
            Json(records)
                .with_header("Cache-Control", CACHE_CONTROL)
                .into_response()
        }
        Err(error) => {
            error!(kind = error.kind(), "Error reading {}: {:#}", resource.name(), error);
            let details = match error.to_string() {
                details if details.is_empty() => UNKNOWN_ERROR.to_string(),
                details => details,
            };
            let envelope = ErrorEnvelope {
                error: resource.failure_label(),
                details,
            };
            Json(envelope)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .with_header("Cache-Control", CACHE_CONTROL)
                .into_response()
        }
    }
}
