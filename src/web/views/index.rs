use maud::{html, Markup, DOCTYPE};
use poem::web::{Data, Html, Redirect};
use poem::{handler, IntoResponse, Request, Response};

use crate::landing::Redirector;
use crate::prelude::*;
use crate::web::partials::headers;
use crate::web::state::State;

/// Landing page: sends the visitor to the dashboard or to the sign-in page.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(request: &Request, state: Data<&State>) -> Response {
    let status = state.resolve(request);
    let mut redirector = Redirector::default();
    match redirector.observe(&status) {
        Some(navigation) => {
            debug!(?navigation, "redirecting");
            Redirect::see_other(navigation.path()).into_response()
        }
        None => Html(render_placeholder().into_string())
            .with_header("Cache-Control", "no-cache")
            .into_response(),
    }
}

/// Shown until the authentication status is known, reloads itself.
fn render_placeholder() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                meta http-equiv="refresh" content="1";
                title { "Redirecting…" }
            }
            body {
                section.hero.is-fullheight {
                    div.hero-body {
                        div.container.has-text-centered {
                            p { "Redirecting..." }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::http::{header, StatusCode};

    use super::*;
    use crate::web::test::{
        create_standalone_test_client, create_test_state, PendingIdentityProvider, TEST_TOKEN,
    };

    #[tokio::test]
    async fn pending_renders_placeholder() -> Result {
        let client = create_standalone_test_client(State::new(".", PendingIdentityProvider));
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        assert!(response.0.headers().get(header::LOCATION).is_none());
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Redirecting..."), "{}", body);
        Ok(())
    }

    #[tokio::test]
    async fn signed_in_redirects_to_dashboard() {
        let client = create_standalone_test_client(create_test_state("."));
        let response = client
            .get("/")
            .header(header::COOKIE, format!("session={}", TEST_TOKEN))
            .send()
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/dashboard/agencies");
    }

    #[tokio::test]
    async fn signed_out_redirects_to_sign_in() {
        let client = create_standalone_test_client(create_test_state("."));
        let response = client.get("/").send().await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/sign-in");
    }
}
