use actix_web::web;

use crate::handlers::home::home;

mod projects;
mod about;
mod contact;
mod system;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(system::config_routes)
            .configure(projects::config_routes)
            .configure(about::config_routes)
            .configure(contact::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
