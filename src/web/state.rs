use std::path::PathBuf;
use std::sync::Arc;

use poem::Request;

use crate::auth::{AuthStatus, Credentials, IdentityProvider};
use crate::records::{ReadError, Record};
use crate::resource::Resource;

/// Web application global state.
#[derive(Clone)]
pub struct State {
    /// Directory containing the CSV exports.
    data_dir: PathBuf,

    identity_provider: Arc<dyn IdentityProvider>,
}

impl State {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        identity_provider: impl IdentityProvider + 'static,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            identity_provider: Arc::new(identity_provider),
        }
    }

    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    /// Resolves the request credentials against the identity provider.
    pub fn resolve(&self, request: &Request) -> AuthStatus {
        self.identity_provider
            .resolve(&Credentials::from_request(request))
    }

    pub async fn read(&self, resource: Resource) -> Result<Vec<Record>, ReadError> {
        resource.read(&self.data_dir).await
    }
}
