use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, CookieJarManager, Tracing};
use poem::{get, Endpoint, EndpointExt, Route, Server};

use self::middleware::{
    AuthGate, ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware, TimeItMiddleware,
};
use self::state::State;
use self::views::{api, dashboard, index, sign_in};
use crate::auth::{AccessToken, TokenIdentityProvider};
use crate::opts::WebOpts;
use crate::prelude::*;

mod cookies;
mod middleware;
mod partials;
mod state;
mod views;


/// Runs the web app.
pub async fn run(opts: WebOpts) -> Result {
    let names: Vec<&str> = opts.access_tokens.iter().map(AccessToken::name).collect();
    info!(?names, "configured access tokens");
    let identity_provider = TokenIdentityProvider::from_iter(opts.access_tokens);
    if identity_provider.is_empty() {
        warn!("no access tokens configured, every protected route will be rejected");
    } else {
        info!(n_access_tokens = identity_provider.len(), "access tokens loaded");
    }
    info!(data_dir = ?opts.data_dir, "serving the CSV exports");
    let app = create_app(State::new(opts.data_dir, identity_provider));

    info!(host = opts.host.as_str(), port = opts.port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    error!("failed to listen for the shutdown signal: {:#}", error);
                }
                info!("shutting down…");
            },
            None,
        )
        .await?;
    Ok(())
}

pub fn create_app(state: State) -> impl Endpoint {
    Route::new()
        .at("/", get(index::get))
        .at("/sign-in", get(sign_in::get).post(sign_in::post))
        .at("/sign-out", get(sign_in::get_sign_out))
        .at("/api/health", get(api::get_health))
        .at("/api/agencies", get(api::get_agencies).with(AuthGate::Api))
        .at("/api/contacts", get(api::get_contacts).with(AuthGate::Api))
        .at("/dashboard/agencies", get(dashboard::get_agencies).with(AuthGate::Html))
        .at("/dashboard/contacts", get(dashboard::get_contacts).with(AuthGate::Html))
        .data(state)
        .with(CookieJarManager::new())
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(TimeItMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}
