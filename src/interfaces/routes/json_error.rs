use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

/// Malformed or mistyped request bodies become a 400 with the usual error body.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::Deserialize(e) => AppError::InvalidInput(format!("JSON error: {}", e)),
            other => AppError::InvalidInput(format!("JSON payload error: {}", other)),
        }
    }
}
