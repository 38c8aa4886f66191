//! Landing page navigation.

use crate::auth::AuthStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Dashboard,
    SignIn,
}

impl Navigation {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard/agencies",
            Self::SignIn => "/sign-in",
        }
    }
}

/// Navigates once the authentication status is determined, and only once.
#[derive(Debug, Default)]
pub struct Redirector {
    navigation: Option<Navigation>,
}

impl Redirector {
    /// Feeds the current status, returns the navigation to perform if any.
    ///
    /// Every call after the first navigation returns [`None`], whatever the status.
    pub fn observe(&mut self, status: &AuthStatus) -> Option<Navigation> {
        if self.navigation.is_some() {
            return None;
        }
        self.navigation = match status {
            AuthStatus::Pending => None,
            AuthStatus::SignedIn(_) => Some(Navigation::Dashboard),
            AuthStatus::SignedOut => Some(Navigation::SignIn),
        };
        self.navigation
    }

    #[cfg(test)]
    pub const fn navigation(&self) -> Option<Navigation> {
        self.navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;

    fn signed_in() -> AuthStatus {
        AuthStatus::SignedIn(Identity::new("alice"))
    }

    #[test]
    fn pending_does_not_navigate() {
        let mut redirector = Redirector::default();
        assert_eq!(redirector.observe(&AuthStatus::Pending), None);
        assert_eq!(redirector.observe(&AuthStatus::Pending), None);
        assert_eq!(redirector.navigation(), None);
    }

    #[test]
    fn signed_in_navigates_to_dashboard_once() {
        let mut redirector = Redirector::default();
        assert_eq!(redirector.observe(&AuthStatus::Pending), None);
        assert_eq!(redirector.observe(&signed_in()), Some(Navigation::Dashboard));
        assert_eq!(redirector.observe(&signed_in()), None);
        assert_eq!(redirector.navigation().map(Navigation::path), Some("/dashboard/agencies"));
    }

    #[test]
    fn signed_out_navigates_to_sign_in_once() {
        let mut redirector = Redirector::default();
        assert_eq!(redirector.observe(&AuthStatus::SignedOut), Some(Navigation::SignIn));
        assert_eq!(redirector.observe(&AuthStatus::SignedOut), None);
        assert_eq!(redirector.navigation().map(Navigation::path), Some("/sign-in"));
    }

    #[test]
    fn later_status_change_is_ignored() {
        let mut redirector = Redirector::default();
        assert_eq!(redirector.observe(&AuthStatus::SignedOut), Some(Navigation::SignIn));
        assert_eq!(redirector.observe(&signed_in()), None);
        assert_eq!(redirector.observe(&AuthStatus::Pending), None);
        assert_eq!(redirector.navigation(), Some(Navigation::SignIn));
    }
}
