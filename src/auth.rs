//! Identity resolution for the authentication gate.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;

use poem::http::header;
use poem::Request;

use crate::prelude::*;

/// Cookie holding the access token of a signed-in browser.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// The provider has not settled on an answer yet.
    Pending,

    SignedIn(Identity),
    SignedOut,
}

/// Credentials presented by a request.
#[derive(Default)]
pub struct Credentials {
    pub bearer_token: Option<String>,
    pub session_token: Option<String>,
}

impl Credentials {
    /// Extracts the bearer token and the session cookie.
    ///
    /// The authentication scheme is case-insensitive.
    /// The cookie jar is only available behind [`poem::middleware::CookieJarManager`].
    pub fn from_request(request: &Request) -> Self {
        let bearer_token = request
            .header(header::AUTHORIZATION)
            .and_then(parse_bearer_token)
            .map(str::to_string);
        let session_token = request
            .cookie()
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value_str().to_string())
            .filter(|token| !token.is_empty());
        Self {
            bearer_token,
            session_token,
        }
    }

    /// Presented tokens, the bearer token goes first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.bearer_token
            .iter()
            .chain(self.session_token.iter())
            .map(String::as_str)
    }
}

fn parse_bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("has_bearer_token", &self.bearer_token.is_some())
            .field("has_session_token", &self.session_token.is_some())
            .finish()
    }
}

pub trait IdentityProvider: Send + Sync {
    /// Looks up the identity owning the token.
    fn authenticate(&self, token: &str) -> Option<Identity>;

    fn resolve(&self, credentials: &Credentials) -> AuthStatus {
        credentials
            .tokens()
            .find_map(|token| self.authenticate(token))
            .map_or(AuthStatus::SignedOut, AuthStatus::SignedIn)
    }
}

/// Access token as configured on the command line: `name=token` or a bare `token`.
#[derive(Clone)]
pub struct AccessToken {
    name: String,
    token: String,
}

impl AccessToken {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for AccessToken {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (name, token) = match value.trim().split_once('=') {
            Some((name, token)) => (name.trim(), token.trim()),
            None => (value.trim(), value.trim()),
        };
        if name.is_empty() || token.is_empty() {
            return Err(anyhow!("access token must be `name=token` or a non-empty token"));
        }
        Ok(Self::new(name, token))
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AccessToken")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Identity provider backed by a fixed set of access tokens.
#[derive(Default)]
pub struct TokenIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl TokenIdentityProvider {
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl FromIterator<AccessToken> for TokenIdentityProvider {
    fn from_iter<I: IntoIterator<Item = AccessToken>>(tokens: I) -> Self {
        let identities = tokens
            .into_iter()
            .map(|access_token| (access_token.token, Identity::new(access_token.name)))
            .collect();
        Self { identities }
    }
}

impl IdentityProvider for TokenIdentityProvider {
    fn authenticate(&self, token: &str) -> Option<Identity> {
        self.identities.get(token).cloned()
    }
}
