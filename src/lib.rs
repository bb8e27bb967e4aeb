use sqlx::PgPool;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod presentation;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{cache, db, utils, web};

use cache::InvalidationQueue;
use repositories::sqlx_repo::{SqlxAboutRepo, SqlxContactRepo, SqlxProjectRepo};
use use_cases::{about::AboutHandler, contact::ContactHandler, project::ProjectHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub about_handler: AppAboutHandler,
    pub contact_handler: AppContactHandler,
    pub db_pool: PgPool,
    /// Name of the page-cache backend, reported by the health check.
    pub cache_backend: &'static str,
}

pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo>;
pub type AppAboutHandler = AboutHandler<SqlxAboutRepo>;
pub type AppContactHandler = ContactHandler<SqlxContactRepo>;

impl AppState {
    pub fn new(pool: PgPool, invalidation: InvalidationQueue, cache_backend: &'static str) -> Self {
        let project_handler = ProjectHandler::new(
            SqlxProjectRepo::new(pool.clone()),
            invalidation.clone(),
        );
        let about_handler = AboutHandler::new(
            SqlxAboutRepo::new(pool.clone()),
            invalidation.clone(),
        );
        let contact_handler = ContactHandler::new(
            SqlxContactRepo::new(pool.clone()),
            invalidation,
        );

        AppState {
            project_handler,
            about_handler,
            contact_handler,
            db_pool: pool,
            cache_backend,
        }
    }
}
