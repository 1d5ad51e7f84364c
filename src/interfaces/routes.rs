use actix_web::web;

use crate::handlers::home::{health, home};
use crate::handlers::json_error::not_found;

mod auth;
mod json_error;
mod profile;
mod resume;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health);

    cfg.configure(auth::config_routes);
    cfg.configure(profile::config_routes);
    cfg.configure(resume::config_routes);

    cfg.configure(json_error::config_routes);
    cfg.default_service(web::route().to(not_found));
}
