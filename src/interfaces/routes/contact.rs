use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .service(
                web::resource("")
                    .route(web::get().to(contact::get_contact))
                    .route(web::post().to(contact::create_contact))
            )
            .service(
                web::resource("/{contact_id}")
                    .route(web::get().to(contact::get_contact_by_id))
                    .route(web::patch().to(contact::update_contact))
                    .route(web::delete().to(contact::delete_contact))
            )
    );
}
