use crate::database::DatabaseManager;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{signal, sync::watch, time::timeout};
use tracing::{error, info};

/// Graceful shutdown coordinator
#[derive(Clone)]
pub struct ShutdownCoordinator {
    /// Indicates if shutdown has been initiated
    shutdown_requested: Arc<AtomicBool>,
    /// Watch channel for notifying components of shutdown
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Initiate graceful shutdown
    pub fn initiate_shutdown(&self) {
        if self
            .shutdown_requested
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
            .is_ok()
        {
            info!("Initiating graceful shutdown...");
            if let Err(e) = self.shutdown_tx.send(true) {
                error!("Failed to broadcast shutdown signal: {}", e);
            }
        }
    }

    /// Wait for SIGINT or SIGTERM, then initiate shutdown
    pub async fn wait_for_shutdown_signal(&self) {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
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
            _ = ctrl_c => {
                info!("Received Ctrl+C signal");
            },
            _ = terminate => {
                info!("Received terminate signal");
            },
        }

        self.initiate_shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for components that need graceful shutdown
#[async_trait::async_trait]
pub trait GracefulShutdown {
    /// Component name for logging
    fn name(&self) -> &str;

    async fn shutdown(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Shuts components down in registration order, each bounded by a timeout
pub struct ShutdownManager {
    components: Vec<Box<dyn GracefulShutdown + Send + Sync>>,
    timeout_duration: Duration,
}

impl ShutdownManager {
    pub fn new(timeout_duration: Duration) -> Self {
        Self {
            components: Vec::new(),
            timeout_duration,
        }
    }

    pub fn register<T>(&mut self, component: T)
    where
        T: GracefulShutdown + Send + Sync + 'static,
    {
        self.components.push(Box::new(component));
    }

    /// Register all server components for shutdown
    pub fn register_server_components(&mut self, server: &crate::server::Server) {
        self.register(DatabaseShutdown::new(server.database.clone()));
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Shutdown all registered components
    pub async fn shutdown_all(&self) {
        info!("Shutting down {} components...", self.components.len());

        for component in &self.components {
            let component_name = component.name();

            match timeout(self.timeout_duration, component.shutdown()).await {
                Ok(Ok(())) => {
                    info!("Successfully shut down component: {}", component_name);
                }
                Ok(Err(e)) => {
                    error!("Error shutting down component {}: {}", component_name, e);
                }
                Err(_) => {
                    error!("Timeout shutting down component: {}", component_name);
                }
            }
        }

        info!("Shutdown complete");
    }
}

/// Closes the database pool once in-flight requests have drained
pub struct DatabaseShutdown {
    database: Arc<dyn DatabaseManager>,
}

impl DatabaseShutdown {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }
}

#[async_trait::async_trait]
impl GracefulShutdown for DatabaseShutdown {
    fn name(&self) -> &str {
        "Database"
    }

    async fn shutdown(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Closing database connections...");
        self.database.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct TestComponent {
        name: String,
        shutdown_count: Arc<AtomicUsize>,
        should_fail: bool,
        delay: Duration,
    }

    impl TestComponent {
        fn new(
            name: &str,
            shutdown_count: Arc<AtomicUsize>,
            should_fail: bool,
            delay: Duration,
        ) -> Self {
            Self {
                name: name.to_string(),
                shutdown_count,
                should_fail,
                delay,
            }
        }
    }

    #[async_trait::async_trait]
    impl GracefulShutdown for TestComponent {
        fn name(&self) -> &str {
            &self.name
        }

        async fn shutdown(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            tokio::time::sleep(self.delay).await;
            self.shutdown_count.fetch_add(1, Ordering::SeqCst);

            if self.should_fail {
                Err("Test failure".into())
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_shutdown_coordinator() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();
        assert!(!*rx.borrow());

        coordinator.initiate_shutdown();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        // Second call is a no-op
        coordinator.initiate_shutdown();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_shutdown_manager_continues_after_failure() {
        let shutdown_count = Arc::new(AtomicUsize::new(0));
        let mut manager = ShutdownManager::new(Duration::from_secs(1));

        manager.register(TestComponent::new(
            "FailureComponent",
            shutdown_count.clone(),
            true,
            Duration::from_millis(10),
        ));
        manager.register(TestComponent::new(
            "SuccessComponent",
            shutdown_count.clone(),
            false,
            Duration::from_millis(10),
        ));

        manager.shutdown_all().await;
        assert_eq!(shutdown_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_shutdown_manager_timeout() {
        let shutdown_count = Arc::new(AtomicUsize::new(0));
        let mut manager = ShutdownManager::new(Duration::from_millis(20));

        manager.register(TestComponent::new(
            "SlowComponent",
            shutdown_count.clone(),
            false,
            Duration::from_millis(500),
        ));

        manager.shutdown_all().await;
        assert_eq!(shutdown_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_database_shutdown_closes_pool() {
        let server = crate::test_utils::TestServerBuilder::new().build().await;
        let mut manager = ShutdownManager::new(Duration::from_secs(1));
        manager.register_server_components(&server);
        assert_eq!(manager.component_count(), 1);

        manager.shutdown_all().await;
        assert!(server.database.health_check().await.is_err());
    }
}
