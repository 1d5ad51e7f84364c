use actix_web::web;

use crate::handlers::resume;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // `/list` and `/upload` must register before the `{id}` matchers.
    cfg.service(
        web::scope("/resume")
            .service(resume::upload)
            .service(resume::list)
            .service(resume::get_one)
            .service(resume::delete_one),
    );
}
