use sentry::protocol::User;

/// Sets the signed-in identity on the current Sentry scope.
pub fn set_user(username: impl Into<String>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(User {
            username: Some(username.into()),
            ..Default::default()
        }))
    });
}

/// Clears the current user in Sentry.
pub fn clear_user() {
    sentry::configure_scope(|scope| scope.set_user(None));
}
