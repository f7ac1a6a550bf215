//! Catálogos de referencia, solo lectura.

use axum::{extract::State, Json};
use tareas_domain::entities::CatalogoItem;
use tracing::instrument;

use crate::error::ApiResult;
use crate::routes::AppState;

#[instrument(skip(state))]
pub async fn list_prioridades(State(state): State<AppState>) -> ApiResult<Json<Vec<CatalogoItem>>> {
    let prioridades = state.catalogos.list_prioridades().await?;
    Ok(Json(prioridades))
}

#[instrument(skip(state))]
pub async fn list_estados(State(state): State<AppState>) -> ApiResult<Json<Vec<CatalogoItem>>> {
    let estados = state.catalogos.list_estados().await?;
    Ok(Json(estados))
}
