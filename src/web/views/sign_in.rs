use chrono::Duration;
use maud::{html, Markup, DOCTYPE};
use poem::http::StatusCode;
use poem::web::cookie::CookieJar;
use poem::web::{Data, Form, Html, Redirect};
use poem::{handler, IntoResponse, Response};
use serde::Deserialize;

use crate::auth::SESSION_COOKIE;
use crate::helpers::sentry::clear_user;
use crate::prelude::*;
use crate::web::cookies;
use crate::web::partials::{headers, icon_text};
use crate::web::state::State;

#[derive(Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    token: String,
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get() -> Html<String> {
    Html(render(None).into_string())
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post(Form(form): Form<SignInForm>, jar: &CookieJar, state: Data<&State>) -> Response {
    let token = form.token.trim();
    match state.identity_provider().authenticate(token) {
        Some(identity) => {
            info!(identity = identity.name(), "signed in");
            cookies::Builder::new(SESSION_COOKIE)
                .value_str(token)
                .set_path("/")
                .http_only()
                .expires_in(Duration::days(30))
                .add_to(jar);
            Redirect::see_other("/").into_response()
        }
        None => {
            warn!("invalid access token");
            Html(render(Some("Invalid access token.")).into_string())
                .with_status(StatusCode::UNAUTHORIZED)
                .into_response()
        }
    }
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_sign_out(jar: &CookieJar) -> Redirect {
    cookies::Builder::new(SESSION_COOKIE)
        .set_path("/")
        .make_removal()
        .add_to(jar);
    clear_user();
    Redirect::see_other("/")
}

fn render(error: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Sign in" }
            }
            body {
                section.hero.is-fullheight {
                    div.hero-body {
                        div.container {
                            div.columns.is-centered {
                                div.column."is-4" {
                                    form.box method="POST" action="/sign-in" {
                                        @if let Some(error) = error {
                                            div.notification.is-danger { (error) }
                                        }
                                        div.field {
                                            label.label for="token" { "Access token" }
                                            div.control {
                                                input.input #token type="password" name="token" autocomplete="current-password" required autofocus;
                                            }
                                        }
                                        button.button.is-link.is-fullwidth type="submit" {
                                            (icon_text("fas fa-sign-in-alt", "Sign in"))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::http::header;

    use super::*;
    use crate::web::test::{create_standalone_test_client, create_test_state, TEST_TOKEN};

    #[tokio::test]
    async fn get_ok() -> Result {
        let client = create_standalone_test_client(create_test_state("."));
        let response = client.get("/sign-in").send().await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains(r#"name="token""#), "{}", body);
        Ok(())
    }

    #[tokio::test]
    async fn post_valid_token_sets_session() -> Result {
        let client = create_standalone_test_client(create_test_state("."));
        let response = client
            .post("/sign-in")
            .form(&[("token", TEST_TOKEN)])
            .send()
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/");
        let set_cookie = response
            .0
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| anyhow!("expected a cookie"))?;
        assert!(set_cookie.starts_with(&format!("session={}", TEST_TOKEN)), "{}", set_cookie);
        assert!(set_cookie.contains("HttpOnly"), "{}", set_cookie);
        Ok(())
    }

    #[tokio::test]
    async fn post_invalid_token_unauthorized() -> Result {
        let client = create_standalone_test_client(create_test_state("."));
        let response = client
            .post("/sign-in")
            .form(&[("token", "nope")])
            .send()
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.0.headers().get(header::SET_COOKIE).is_none());
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Invalid access token."), "{}", body);
        Ok(())
    }

    #[tokio::test]
    async fn sign_out_redirects_home() {
        let client = create_standalone_test_client(create_test_state("."));
        let response = client
            .get("/sign-out")
            .header(header::COOKIE, format!("session={}", TEST_TOKEN))
            .send()
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/");
        let cookie = response
            .0
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(cookie.starts_with("session=;"), "{}", cookie);
        assert!(cookie.contains("Path=/"), "{}", cookie);
        assert!(cookie.contains("Max-Age=0"), "{}", cookie);
    }
}
