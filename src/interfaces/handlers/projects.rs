use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::{DEFAULT_FEATURED_LIMIT, DEFAULT_RELATED_LIMIT, MAX_LIST_LIMIT},
    entities::project::{NewProject, UpdateProjectRequest},
    errors::AppError,
    AppState,
};

fn limit_param(query: &HashMap<String, String>, default: u32) -> u32 {
    query.get("limit")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
        .min(MAX_LIST_LIMIT)
}

fn project_not_found(key: &str) -> AppError {
    AppError::NotFound(format!("Project '{}' not found", key))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProject>,
) -> Result<impl Responder, AppError> {
    let project_handler = &state.project_handler;

    let project = project_handler.create_project(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(state))]
pub async fn list_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, query))]
pub async fn get_featured_projects(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let limit = limit_param(&query, DEFAULT_FEATURED_LIMIT);

    let projects = state.project_handler.get_featured_projects(limit).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(project_id, state))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .get_project_by_id(&project_id)
        .await?
        .ok_or_else(|| project_not_found(&project_id))?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state))]
pub async fn get_project_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .get_project_by_slug(&slug)
        .await?
        .ok_or_else(|| project_not_found(&slug))?;

    Ok(HttpResponse::Ok().json(project))
}

/// `?category=` overrides the category of the project named by `slug`,
/// which is otherwise looked up first.
#[instrument(skip(state, query))]
pub async fn get_related_projects(
    slug: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let project_handler = &state.project_handler;
    let limit = limit_param(&query, DEFAULT_RELATED_LIMIT);

    let category = match query.get("category").filter(|c| !c.trim().is_empty()) {
        Some(category) => category.clone(),
        None => project_handler
            .get_project_by_slug(&slug)
            .await?
            .map(|p| p.category)
            .ok_or_else(|| project_not_found(&slug))?,
    };

    let projects = project_handler
        .get_related_projects(&slug, &category, limit)
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(project_id, state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.project_handler
        .update_project(&project_id, data.into_inner())
        .await?
        .ok_or_else(|| project_not_found(&project_id))?;

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(project_id, state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state.project_handler
        .delete_project(&project_id)
        .await?
        .ok_or_else(|| project_not_found(&project_id))?;

    Ok(HttpResponse::Ok().json(deleted))
}
