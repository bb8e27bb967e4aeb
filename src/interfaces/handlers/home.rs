use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio content API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": ["/api/v1/projects", "/api/v1/about", "/api/v1/contact"],
        "health": "/api/v1/health"
    }))
}
