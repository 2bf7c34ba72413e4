//! Service construction and dependency injection

use anyhow::{Context, Result};
use haven_config::{BackendMode, HavenConfig};
use haven_interfaces::{DataSource, IdentityProvider, RepositoryFactory};
use haven_rest_api::AppContext;
use haven_storage::{
    DataSourceRepositoryFactory, HostedAuthClient, InMemoryDataSource, OfflineIdentityProvider, RestDataSource,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Collaborators shared by every request
#[derive(Clone)]
pub struct ServiceContainer {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub identity: Arc<dyn IdentityProvider>,
    pub backend_mode: BackendMode,
}

impl ServiceContainer {
    pub fn new(config: &HavenConfig) -> Result<Self> {
        let (source, identity): (Arc<dyn DataSource>, Arc<dyn IdentityProvider>) = match config.backend.mode {
            BackendMode::Memory => {
                warn!("Using the seeded in-memory store; sign-in is disabled");
                (Arc::new(InMemoryDataSource::seeded()), Arc::new(OfflineIdentityProvider))
            }
            BackendMode::Remote => {
                info!("Using hosted backend at {}", config.backend.base_url());
                let source = RestDataSource::new(&config.backend).context("Failed to create data source client")?;
                let identity = HostedAuthClient::new(&config.backend).context("Failed to create auth client")?;
                (Arc::new(source), Arc::new(identity))
            }
        };

        Ok(Self {
            repositories: Arc::new(DataSourceRepositoryFactory::new(source)),
            identity,
            backend_mode: config.backend.mode,
        })
    }

    pub fn app_context(&self, config: &HavenConfig) -> AppContext {
        AppContext::new(self.repositories.clone(), self.identity.clone(), config.auth.clone())
    }
}
