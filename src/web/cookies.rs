use chrono::{Duration, Utc};
use poem::web::cookie::{Cookie, CookieJar};

use crate::prelude::DateTime;

pub struct Builder(Cookie);

impl Builder {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cookie::named(name))
    }

    /// Stores the value as is, without JSON encoding.
    pub fn value_str(mut self, value: impl Into<String>) -> Self {
        self.0.set_value_str(value);
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime) -> Self {
        self.0.set_expires(expires_at);
        self
    }

    pub fn expires_in(self, duration: impl Into<Duration>) -> Self {
        self.expires_at(Utc::now() + duration.into())
    }

    pub fn set_path(mut self, path: impl Into<String>) -> Self {
        self.0.set_path(path);
        self
    }

    pub fn http_only(mut self) -> Self {
        self.0.set_http_only(true);
        self
    }

    /// Empties and expires the cookie. Browsers match the removal on name and path.
    pub fn make_removal(mut self) -> Self {
        self.0.make_removal();
        self
    }

    #[allow(clippy::missing_const_for_fn)]
    pub fn build(self) -> Cookie {
        self.0
    }

    pub fn add_to(self, jar: &CookieJar) {
        jar.add(self.build());
    }
}
