use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tracing::instrument;

use crate::{
    entities::about::{NewAbout, UpdateAboutRequest},
    errors::AppError,
    presentation::timeline::{render_timeline_html, TimelineItem},
    AppState,
};

#[derive(Serialize)]
struct TimelineResponse {
    items: Vec<TimelineItem>,
    html: String,
}

fn about_not_found() -> AppError {
    AppError::NotFound("About content not found".into())
}

#[instrument(skip(state))]
pub async fn get_about(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let about = state.about_handler
        .get_about()
        .await?
        .ok_or_else(about_not_found)?;

    Ok(HttpResponse::Ok().json(about))
}

#[instrument(skip(about_id, state))]
pub async fn get_about_by_id(
    about_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let about = state.about_handler
        .get_about_by_id(&about_id)
        .await?
        .ok_or_else(about_not_found)?;

    Ok(HttpResponse::Ok().json(about))
}

#[instrument(skip(state))]
pub async fn get_timeline(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let items = state.about_handler.get_timeline().await?;
    let html = render_timeline_html(&items);

    Ok(HttpResponse::Ok().json(TimelineResponse { items, html }))
}

#[instrument(skip(state, data))]
pub async fn create_about(
    state: web::Data<AppState>,
    data: web::Json<NewAbout>,
) -> Result<impl Responder, AppError> {
    let about = state.about_handler.create_about(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(about))
}

#[instrument(skip(about_id, state, data))]
pub async fn update_about(
    about_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateAboutRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.about_handler
        .update_about(&about_id, data.into_inner())
        .await?
        .ok_or_else(about_not_found)?;

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(about_id, state))]
pub async fn delete_about(
    about_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.about_handler
        .delete_about(&about_id)
        .await?
        .ok_or_else(about_not_found)?;

    Ok(HttpResponse::Ok().json(deleted))
}
