pub mod employee;
pub mod health;

use actix_cors::Cors;
use actix_web::{error, web};

use crate::errors::AppError;

/// Any origin may call the API; the frontend is served separately.
pub fn cors() -> Cors {
    Cors::permissive()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| error::Error::from(AppError::BadRequest(err.to_string()))),
    )
    .service(web::resource("/").route(web::get().to(health::health_check)))
    .service(
        web::resource("/api/employees")
            .route(web::get().to(employee::get_employees))
            .route(web::post().to(employee::create_employee))
            .route(web::put().to(employee::update_employee)),
    )
    .service(
        web::resource("/api/employees/{id}")
            .route(web::delete().to(employee::delete_employee)),
    );
}
