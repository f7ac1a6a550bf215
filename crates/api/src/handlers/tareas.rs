//! Handlers CRUD de `/tareas`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tareas_domain::{
    entities::{NuevaTarea, Tarea, TareaPatch, DEFAULT_ESTADO_ID},
    value_objects::PatchField,
};
use tareas_errors::TareasError;
use tracing::{info, instrument};

use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;
use crate::validation::{parse_fecha, validate_tarea_payload, ValidationMode};

/// Cuerpo de `POST /tareas` y `PUT /tareas/{id}`. Todos los campos son
/// tri-estado para que el validador pueda distinguir "ausente" de "null";
/// qué combinaciones son aceptables depende del modo de validación.
#[derive(Debug, Default, Deserialize)]
pub struct TareaPayload {
    #[serde(default)]
    pub titulo: PatchField<String>,
    #[serde(default)]
    pub descripcion: PatchField<String>,
    #[serde(default)]
    pub prioridad_id: PatchField<i64>,
    #[serde(default)]
    pub estado_id: PatchField<i64>,
    /// Fecha en texto `YYYY-MM-DD`; el validador comprueba el formato antes
    /// de convertirla.
    #[serde(default)]
    pub fecha_vencimiento: PatchField<String>,
}

impl TareaPayload {
    /// Solo tras validar en modo `Create`: los obligatorios ya están `Set`.
    fn into_nueva(self) -> ApiResult<NuevaTarea> {
        let titulo = match self.titulo {
            PatchField::Set(titulo) => titulo,
            _ => return Err(ApiError::Internal("payload validado sin titulo".to_string())),
        };
        let prioridad_id = match self.prioridad_id {
            PatchField::Set(id) => id,
            _ => {
                return Err(ApiError::Internal(
                    "payload validado sin prioridad_id".to_string(),
                ))
            }
        };
        let estado_id = match self.estado_id {
            PatchField::Set(id) => id,
            _ => {
                return Err(ApiError::Internal(
                    "payload validado sin estado_id".to_string(),
                ))
            }
        };
        let fecha_vencimiento = match self.fecha_vencimiento {
            PatchField::Set(fecha) => Some(
                parse_fecha(&fecha)
                    .map_err(|e| ApiError::Internal(format!("fecha ya validada no parsea: {e}")))?,
            ),
            _ => None,
        };

        Ok(NuevaTarea::new(
            &titulo,
            self.descripcion.apply_to(None),
            prioridad_id,
            estado_id,
            fecha_vencimiento,
        ))
    }

    /// Solo tras validar en modo `Update`: los null sobre campos no anulables
    /// ya fueron rechazados.
    fn into_patch(self) -> ApiResult<TareaPatch> {
        let fecha_vencimiento = self
            .fecha_vencimiento
            .try_map(|fecha| parse_fecha(&fecha))
            .map_err(|e| ApiError::Internal(format!("fecha ya validada no parsea: {e}")))?;

        Ok(TareaPatch {
            titulo: self.titulo.apply_to(None),
            descripcion: self.descripcion,
            prioridad_id: self.prioridad_id.apply_to(None),
            estado_id: self.estado_id.apply_to(None),
            fecha_vencimiento,
        })
    }
}

#[instrument(skip(state, payload))]
pub async fn create_tarea(
    State(state): State<AppState>,
    payload: Result<Json<TareaPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Tarea>)> {
    let Json(mut payload) = payload?;

    // El default se aplica antes de validar; un estado_id null explícito
    // sigue siendo rechazado.
    payload.estado_id = payload.estado_id.or_set(DEFAULT_ESTADO_ID);

    validate_tarea_payload(&payload, ValidationMode::Create, state.catalogos.as_ref()).await?;

    let nueva = payload.into_nueva()?;
    let tarea = state.tareas.create(&nueva).await?;
    info!(id = tarea.id, "tarea creada");

    Ok((StatusCode::CREATED, Json(tarea)))
}

#[instrument(skip(state))]
pub async fn list_tareas(State(state): State<AppState>) -> ApiResult<Json<Vec<Tarea>>> {
    let tareas = state.tareas.list().await?;
    Ok(Json(tareas))
}

#[instrument(skip(state))]
pub async fn get_tarea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Tarea>> {
    let tarea = state
        .tareas
        .get_by_id(id)
        .await?
        .ok_or_else(|| TareasError::tarea_not_found(id))?;
    Ok(Json(tarea))
}

#[instrument(skip(state, payload))]
pub async fn update_tarea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<TareaPayload>, JsonRejection>,
) -> ApiResult<Json<Tarea>> {
    let Json(payload) = payload?;

    validate_tarea_payload(&payload, ValidationMode::Update, state.catalogos.as_ref()).await?;

    let patch = payload.into_patch()?;
    let tarea = state.tareas.update(id, &patch).await?;
    info!(id, "tarea actualizada");

    Ok(Json(tarea))
}

#[instrument(skip(state))]
pub async fn delete_tarea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.tareas.delete(id).await?;
    info!(id, "tarea eliminada");

    Ok(Json(json!({
        "mensaje": format!("Tarea con id {id} eliminada correctamente")
    })))
}
