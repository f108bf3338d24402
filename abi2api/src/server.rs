//! HTTP server wiring.

use crate::catalog::EndpointCatalog;
use crate::config::Config;
use crate::executor::ExecutorClient;
use crate::handlers;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;

/// Timeout for one executor round trip.
pub const EXECUTOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the server until shutdown. The catalog is registered before this
/// point and shared read-only, every worker gets the same routes.
pub async fn run(config: Config, catalog: EndpointCatalog) -> std::io::Result<()> {
    let catalog = Arc::new(catalog);
    let executor = ExecutorClient::new(&config.executor_url, EXECUTOR_TIMEOUT);
    info!("listening on 0.0.0.0:{}", config.port);
    HttpServer::new(move || {
        let catalog = catalog.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(executor.clone()))
            .app_data(web::Data::from(catalog.clone()))
            .configure(|cfg| handlers::register_routes(cfg, &catalog))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
