mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use carphoto_config::{Config, CorsConfig};
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    health_path: Option<String>,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the image relay fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config.server.effective_listen_address();
        let relay = carphoto_relay::build_relay(config)?;

        let mut app = Router::new();

        // Health check
        let health_path = config.server.health.enabled.then(|| config.server.health.path.clone());
        if let Some(ref path) = health_path {
            app = app.route(path, axum::routing::get(health::health_handler));
        }

        // Image generation
        app = app.merge(carphoto_relay::endpoint_router(&config.relay.path).with_state(relay));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS, permissive unless configured
        let default_cors = CorsConfig::default();
        app = app.layer(cors::cors_layer(config.server.cors.as_ref().unwrap_or(&default_cors)));

        Ok(Self {
            router: app,
            listen_address,
            health_path,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "Car Photo Generator Server listening");

        if let Some(ref path) = self.health_path {
            tracing::info!("health check: http://localhost:{}{path}", local_addr.port());
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
