//! HTTP inbound adapter exposing the JSON API.

use actix_web::web;

pub mod dto;
pub mod error;
pub mod health;
pub mod points;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// Register every `/api` handler. The caller supplies the enclosing scope
/// and its session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use geonotes::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::register)
        .service(users::logout)
        .service(users::current_user)
        .service(points::list_points)
        .service(points::create_point)
        .service(points::update_point)
        .service(points::delete_point);
}
