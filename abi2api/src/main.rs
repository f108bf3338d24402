use abi2api::catalog::EndpointCatalog;
use abi2api::config::Config;
use abi2api::server;
use log::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ABI2API_CONFIG").ok())
        .unwrap_or_else(|| "config.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("could not load config {config_path}: {e}");
            std::process::exit(1);
        }
    };
    let mut catalog = EndpointCatalog::default();
    for app in &config.apps {
        if let Err(e) = catalog
            .register(&app.name, &app.contract_address, &app.abi_path)
            .await
        {
            error!("could not register app {}: {e}", app.name);
            std::process::exit(1);
        }
    }
    server::run(config, catalog).await
}
