use poem::http::{header, StatusCode};
use poem::web::{Json, Redirect};
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};
use serde_json::json;

use crate::auth::AuthStatus;
use crate::helpers::sentry::set_user;
use crate::landing::Navigation;
use crate::prelude::*;
use crate::web::state::State;

/// Lets only the signed-in requests through.
///
/// The resolved [`crate::auth::Identity`] is attached to the request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthGate {
    /// Rejects with `401 Unauthorized` and a JSON body.
    Api,

    /// Rejects with a redirect to the sign-in page.
    Html,
}

impl AuthGate {
    fn reject(self) -> Response {
        match self {
            Self::Api => Json(json!({ "error": "Unauthorized" }))
                .with_status(StatusCode::UNAUTHORIZED)
                .with_header(header::WWW_AUTHENTICATE, "Bearer")
                .into_response(),
            Self::Html => Redirect::see_other(Navigation::SignIn.path()).into_response(),
        }
    }
}

impl<E: Endpoint> Middleware<E> for AuthGate {
    type Output = AuthGateImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        AuthGateImpl { ep, gate: *self }
    }
}

pub struct AuthGateImpl<E> {
    ep: E,
    gate: AuthGate,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for AuthGateImpl<E> {
    type Output = Response;

    async fn call(&self, mut request: Request) -> Result<Self::Output> {
        let status = request
            .data::<State>()
            .ok_or_else(|| anyhow!("the application state is missing"))?
            .resolve(&request);
        match status {
            AuthStatus::SignedIn(identity) => {
                debug!(identity = identity.name(), path = request.uri().path(), "granted");
                set_user(identity.name());
                request.set_data(identity);
                Ok(self.ep.call(request).await?.into_response())
            }
            status => {
                info!(?status, method = ?request.method(), path = request.uri().path(), "rejected");
                Ok(self.gate.reject())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::test::TestClient;
    use poem::web::Data;
    use poem::{get, handler, EndpointExt, Route};

    use super::*;
    use crate::auth::{AccessToken, Identity, TokenIdentityProvider};
    use crate::web::middleware::ErrorMiddleware;
    use crate::web::test::PendingIdentityProvider;

    #[handler]
    fn whoami(identity: Data<&Identity>) -> String {
        identity.name().to_string()
    }

    #[handler]
    fn hello() -> &'static str {
        "hello"
    }

    fn client(state: State) -> TestClient<impl Endpoint> {
        let app = Route::new()
            .at("/api/whoami", get(whoami).with(AuthGate::Api))
            .at("/whoami", get(whoami).with(AuthGate::Html))
            .at("/public", get(hello))
            .data(state)
            .with(poem::middleware::CookieJarManager::new())
            .with(ErrorMiddleware);
        TestClient::new(app)
    }

    fn token_state() -> State {
        let provider = TokenIdentityProvider::from_iter([AccessToken::new("alice", "s3cr3t")]);
        State::new(".", provider)
    }

    #[tokio::test]
    async fn api_without_credentials_unauthorized() -> crate::prelude::Result {
        let response = client(token_state()).get("/api/whoami").send().await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_header(header::WWW_AUTHENTICATE, "Bearer");
        let body = response
            .0
            .into_body()
            .into_json::<serde_json::Value>()
            .await
            .map_err(|error| anyhow!("{}", error))?;
        assert_eq!(body, json!({ "error": "Unauthorized" }));
        Ok(())
    }

    #[tokio::test]
    async fn api_with_wrong_token_unauthorized() {
        let response = client(token_state())
            .get("/api/whoami")
            .header(header::AUTHORIZATION, "Bearer nope")
            .send()
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn api_with_bearer_token_ok() {
        let response = client(token_state())
            .get("/api/whoami")
            .header(header::AUTHORIZATION, "Bearer s3cr3t")
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_text("alice").await;
    }

    #[tokio::test]
    async fn api_with_lowercase_scheme_ok() {
        let response = client(token_state())
            .get("/api/whoami")
            .header(header::AUTHORIZATION, "bearer s3cr3t")
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_text("alice").await;
    }

    #[tokio::test]
    async fn page_with_session_cookie_ok() {
        let response = client(token_state())
            .get("/whoami")
            .header(header::COOKIE, "session=s3cr3t")
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_text("alice").await;
    }

    #[tokio::test]
    async fn page_without_credentials_redirects_to_sign_in() {
        let response = client(token_state()).get("/whoami").send().await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header(header::LOCATION, "/sign-in");
    }

    #[tokio::test]
    async fn pending_status_is_rejected() {
        let response = client(State::new(".", PendingIdentityProvider))
            .get("/api/whoami")
            .header(header::AUTHORIZATION, "Bearer s3cr3t")
            .send()
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn public_route_is_not_gated() {
        let response = client(token_state()).get("/public").send().await;
        response.assert_status_is_ok();
        response.assert_text("hello").await;
    }
}
