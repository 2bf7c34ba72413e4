use anyhow::{Context, Result};
use axum::Router;
use haven_config::HavenConfig;
use haven_rest_api::{create_rest_app, AppConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::services::ServiceContainer;

pub struct Server {
    config: HavenConfig,
    services: ServiceContainer,
}

impl Server {
    pub fn new(config: HavenConfig) -> Result<Self> {
        config.validate_all().context("Invalid configuration")?;
        let services = ServiceContainer::new(&config)?;
        Ok(Self { config, services })
    }

    pub fn build_app(&self) -> Router {
        create_rest_app(self.services.app_context(&self.config), AppConfig::from_config(&self.config))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.server.bind_address, self.config.server.port)
    }

    pub async fn start(self) -> Result<()> {
        let addr = self.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.build_app();
        self.log_config_summary();
        info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        let config = &self.config;
        info!("=== Haven Server Configuration ===");
        info!("Bind Address: {}", self.bind_address());
        info!("Environment: {:?}", config.server.environment);
        info!("Backend: {:?}", self.services.backend_mode);
        info!(
            "Static Assets: {}",
            config
                .server
                .static_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        info!("Protected Paths: {}", config.auth.protected_paths.join(", "));
        info!("==================================");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = HavenConfig::default();
        config.server.port = 0;
        assert!(Server::new(config).is_err());
    }

    #[test]
    fn test_bind_address() {
        let mut config = HavenConfig::default();
        config.server.bind_address = "127.0.0.1".to_string();
        config.server.port = 8080;
        let server = Server::new(config).unwrap();
        assert_eq!(server.bind_address(), "127.0.0.1:8080");
    }
}
