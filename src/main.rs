mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use crate::config::Config;
use crate::db::{EmployeeStore, InMemoryEmployeeStore, PgEmployeeStore};
use crate::services::EmployeeService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let store: Arc<dyn EmployeeStore> = match &config.database_url {
        Some(url) => {
            let pool = db::postgres::create_pool(url, config.max_connections)
                .await
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
            info!("Connected to Postgres employee store");
            Arc::new(PgEmployeeStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, employees are kept in memory only");
            Arc::new(InMemoryEmployeeStore::new())
        }
    };
    let service = web::Data::new(EmployeeService::new(store));

    info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(handlers::cors())
            .app_data(service.clone())
            .configure(handlers::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
