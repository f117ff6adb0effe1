pub mod config;
pub mod request_logger;

use crate::{
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    metrics,
    routes::{
        create_docs_routes, create_health_routes, create_statistics_routes,
        create_submission_routes,
    },
    server::request_logger::request_response_logger,
    shutdown::{ShutdownCoordinator, ShutdownManager},
    survey::{
        AggregationService, AggregationServiceImpl, SubmissionService, SubmissionServiceImpl,
    },
    utils::request_id_middleware,
};
use axum::{Router, extract::DefaultBodyLimit, middleware};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Survey payloads are small; anything larger is rejected before parsing
const MAX_BODY_SIZE: usize = 64 * 1024;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub submission_service: Arc<dyn SubmissionService>,
    pub aggregation_service: Arc<dyn AggregationService>,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        if config.metrics.enabled {
            if let Err(e) = metrics::init_metrics_with_port(config.metrics.port) {
                error!(
                    "Failed to start metrics server on port {}: {}",
                    config.metrics.port, e
                );
                return Err(AppError::Internal(format!(
                    "Failed to start metrics server: {}",
                    e
                )));
            }
        }

        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config.database)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let submission_service: Arc<dyn SubmissionService> = Arc::new(
            SubmissionServiceImpl::new(database.clone(), config.survey.clone()),
        );
        let aggregation_service: Arc<dyn AggregationService> =
            Arc::new(AggregationServiceImpl::new(database.clone()));

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;

        Ok(Self {
            config: Arc::new(config),
            database,
            submission_service,
            aggregation_service,
            health_service,
            shutdown_coordinator: Arc::new(ShutdownCoordinator::new()),
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            self.database.migrate().await.map_err(AppError::Database)?;
        }

        let mut shutdown_manager = ShutdownManager::new(Duration::from_secs(30));
        shutdown_manager.register_server_components(self);

        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Server listening on http://{}", addr);

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            info!("Graceful shutdown initiated");
        })
        .await;

        if let Err(e) = result {
            error!("Server error: {}", e);
        }

        shutdown_manager.shutdown_all().await;
        info!("Server shutdown complete");

        Ok(())
    }

    /// Creates the application router
    pub fn create_app(&self) -> Router {
        let app = Router::new()
            .nest("/health", create_health_routes())
            .nest(
                "/submissions",
                create_submission_routes().layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
            )
            .merge(create_statistics_routes())
            .merge(create_docs_routes())
            .with_state(self.clone());

        self.add_middleware(app)
    }

    fn add_middleware(&self, mut app: Router) -> Router {
        if self.config.metrics.enabled {
            app = app.layer(middleware::from_fn(metrics::metrics_middleware));
        }
        if self.config.logging.log_request {
            app = app.layer(middleware::from_fn(request_response_logger));
        }
        // Outermost, so the logger sees the ID
        app.layer(middleware::from_fn(request_id_middleware))
    }
}
