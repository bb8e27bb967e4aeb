use actix_web::web;

use crate::handlers::about;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/about")
            .service(
                web::resource("")
                    .route(web::get().to(about::get_about))
                    .route(web::post().to(about::create_about))
            )
            .service(
                web::resource("/timeline")
                    .route(web::get().to(about::get_timeline))
            )
            .service(
                web::resource("/{about_id}")
                    .route(web::get().to(about::get_about_by_id))
                    .route(web::patch().to(about::update_about))
                    .route(web::delete().to(about::delete_about))
            )
    );
}
