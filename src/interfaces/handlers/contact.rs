use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact::{NewContact, UpdateContactRequest},
    errors::AppError,
    AppState,
};

fn contact_not_found() -> AppError {
    AppError::NotFound("Contact details not found".into())
}

#[instrument(skip(state))]
pub async fn get_contact(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler
        .get_contact()
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(HttpResponse::Ok().json(contact))
}

#[instrument(skip(contact_id, state))]
pub async fn get_contact_by_id(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler
        .get_contact_by_id(&contact_id)
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(HttpResponse::Ok().json(contact))
}

#[instrument(skip(state, data))]
pub async fn create_contact(
    state: web::Data<AppState>,
    data: web::Json<NewContact>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler.create_contact(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(contact))
}

#[instrument(skip(contact_id, state, data))]
pub async fn update_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateContactRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.contact_handler
        .update_contact(&contact_id, data.into_inner())
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(contact_id, state))]
pub async fn delete_contact(
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.contact_handler
        .delete_contact(&contact_id)
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(HttpResponse::Ok().json(deleted))
}
