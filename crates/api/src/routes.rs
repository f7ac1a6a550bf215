use std::sync::Arc;

use axum::{routing::get, Router};
use tareas_domain::repositories::{CatalogoRepository, TareaRepository};

use crate::handlers;

/// Estado compartido por los handlers: repositorios tras `Arc<dyn ...>` para
/// poder inyectar dobles en los tests.
#[derive(Clone)]
pub struct AppState {
    pub tareas: Arc<dyn TareaRepository>,
    pub catalogos: Arc<dyn CatalogoRepository>,
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/tareas",
            get(handlers::tareas::list_tareas).post(handlers::tareas::create_tarea),
        )
        .route(
            "/tareas/{id}",
            get(handlers::tareas::get_tarea)
                .put(handlers::tareas::update_tarea)
                .delete(handlers::tareas::delete_tarea),
        )
        .route("/prioridades", get(handlers::catalogos::list_prioridades))
        .route("/estados", get(handlers::catalogos::list_estados))
        .with_state(state)
}
