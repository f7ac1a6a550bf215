//! # Tareas API
//!
//! Capa HTTP del servicio de tareas, construida sobre Axum.
//!
//! ## Endpoints
//!
//! - `POST /tareas` - crear tarea
//! - `GET /tareas` - listar tareas (más recientes primero)
//! - `GET /tareas/{id}` - obtener una tarea
//! - `PUT /tareas/{id}` - actualización parcial
//! - `DELETE /tareas/{id}` - borrado físico
//! - `GET /prioridades` / `GET /estados` - catálogos de referencia
//! - `GET /health` - comprobación de estado
//!
//! Las respuestas de error siguen el contrato `{"error": mensaje}` y, para
//! fallos de validación, `{"error": "Datos inválidos", "details": {campo:
//! mensaje}}`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;

use axum::Router;

pub use error::{ApiError, ApiResult};
pub use routes::{create_routes, AppState};

/// Monta las rutas con las capas de trazado, logging y (opcionalmente) CORS.
pub fn create_app(state: AppState, cors_enabled: bool) -> Router {
    let mut app = create_routes(state)
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(middleware::trace_layer());

    if cors_enabled {
        app = app.layer(middleware::cors_layer());
    }

    app
}
