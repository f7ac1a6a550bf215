use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tareas_errors::TareasError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("error de almacenamiento: {0}")]
    Store(#[from] TareasError),

    #[error("datos inválidos")]
    Validation(#[from] validator::ValidationErrors),

    #[error("solicitud incorrecta: {0}")]
    BadRequest(String),

    #[error("error interno: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

// Cuerpo ausente o no parseable como JSON.
impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::BadRequest("No se recibieron datos JSON".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Store(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, json!({ "error": err.user_message() }))
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Datos inválidos", "details": validation_details(errors) }),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            // El detalle de almacenamiento queda en los logs, nunca en la
            // respuesta.
            ApiError::Store(err) => {
                tracing::error!("fallo de almacenamiento: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": err.user_message() }),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("error interno: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Error interno del servidor" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Mapa campo → primer mensaje, con orden estable de claves.
fn validation_details(errors: &validator::ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(campo, errs)| {
            let mensaje = errs
                .first()
                .and_then(|e| e.message.clone())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "valor inválido".to_string());
            (campo.to_string(), mensaje)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ApiError::Store(TareasError::tarea_not_found(123));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_generic_store_error_maps_to_500() {
        let error = ApiError::Store(TareasError::database_error("disco lleno"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let error = ApiError::BadRequest("No se recibieron datos JSON".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let error = ApiError::Internal("estado imposible".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "titulo",
            ValidationError::new("obligatorio")
                .with_message(Cow::Borrowed("El campo 'titulo' es obligatorio.")),
        );
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_details_takes_first_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "fecha_vencimiento",
            ValidationError::new("formato")
                .with_message(Cow::Borrowed("Formato de fecha inválido. Use YYYY-MM-DD.")),
        );
        errors.add(
            "titulo",
            ValidationError::new("vacio")
                .with_message(Cow::Borrowed("El título no puede estar vacío.")),
        );

        let details = validation_details(&errors);
        assert_eq!(details.len(), 2);
        assert_eq!(
            details["titulo"],
            "El título no puede estar vacío."
        );
        assert_eq!(
            details["fecha_vencimiento"],
            "Formato de fecha inválido. Use YYYY-MM-DD."
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let api_error: ApiError = TareasError::tarea_not_found(7).into();
        assert!(matches!(
            api_error,
            ApiError::Store(TareasError::TareaNotFound { id: 7 })
        ));
    }
}
