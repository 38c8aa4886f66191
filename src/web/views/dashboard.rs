use maud::{html, Markup, DOCTYPE};
use poem::http::StatusCode;
use poem::web::{Data, Html};
use poem::{handler, IntoResponse, Response};

use crate::auth::Identity;
use crate::prelude::*;
use crate::resource::Resource;
use crate::web::partials::{headers, navbar, records_table};
use crate::web::state::State;

/// Dashboard shell, renders the content as is.
pub fn layout(content: Markup) -> Markup {
    content
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_agencies(state: Data<&State>, identity: Data<&Identity>) -> Response {
    render(&state, &identity, Resource::Agencies).await
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_contacts(state: Data<&State>, identity: Data<&Identity>) -> Response {
    render(&state, &identity, Resource::Contacts).await
}

async fn render(state: &State, identity: &Identity, resource: Resource) -> Response {
    let (status, content) = match state.read(resource).await {
        Ok(records) => (StatusCode::OK, records_table(&records)),
        Err(error) => {
            error!(kind = error.kind(), "Error reading {}: {:#}", resource.name(), error);
            let content = html! {
                div.notification.is-danger {
                    p { strong { (resource.failure_label()) } }
                    p { (error.to_string()) }
                }
            };
            (StatusCode::INTERNAL_SERVER_ERROR, content)
        }
    };

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { (resource.title()) }
            }
            body {
                (navbar(resource, identity))
                section.section {
                    div.container {
                        (layout(content))
                    }
                }
            }
        }
    };
    Html(markup.into_string())
        .with_status(status)
        .with_header("Cache-Control", "no-cache")
        .into_response()
}
