//! Reglas de validación del payload de tareas.
//!
//! Las comprobaciones de existencia de catálogo pasan por el
//! [`CatalogoRepository`] recibido como colaborador; el validador no muta
//! nada ni toca estado global.

use std::borrow::Cow;

use chrono::NaiveDate;
use tareas_domain::{repositories::CatalogoRepository, value_objects::PatchField};
use validator::{ValidationError, ValidationErrors};

use crate::error::ApiError;
use crate::handlers::tareas::TareaPayload;

pub const FECHA_FORMATO: &str = "%Y-%m-%d";
pub const MAX_TITULO: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Alta: `titulo`, `prioridad_id` y `estado_id` son obligatorios.
    Create,
    /// Actualización parcial: solo se valida lo que viene en el payload.
    Update,
}

pub fn parse_fecha(valor: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(valor, FECHA_FORMATO)
}

fn obligatorio(campo: &str) -> ValidationError {
    ValidationError::new("obligatorio")
        .with_message(Cow::Owned(format!("El campo '{campo}' es obligatorio.")))
}

fn no_nulo(campo: &str) -> ValidationError {
    ValidationError::new("nulo")
        .with_message(Cow::Owned(format!("El campo '{campo}' no puede ser nulo.")))
}

/// Valida el payload completo y devuelve todos los errores de campo juntos,
/// no solo el primero.
pub async fn validate_tarea_payload(
    payload: &TareaPayload,
    mode: ValidationMode,
    catalogos: &dyn CatalogoRepository,
) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::new();

    match &payload.titulo {
        PatchField::Set(titulo) => {
            let recortado = titulo.trim();
            if recortado.is_empty() {
                errors.add(
                    "titulo",
                    ValidationError::new("vacio")
                        .with_message(Cow::Borrowed("El título no puede estar vacío.")),
                );
            } else if recortado.chars().count() > MAX_TITULO {
                errors.add(
                    "titulo",
                    ValidationError::new("longitud").with_message(Cow::Borrowed(
                        "El título no puede superar los 100 caracteres.",
                    )),
                );
            }
        }
        PatchField::Null => match mode {
            ValidationMode::Create => errors.add("titulo", obligatorio("titulo")),
            ValidationMode::Update => errors.add("titulo", no_nulo("titulo")),
        },
        PatchField::Omitted => {
            if mode == ValidationMode::Create {
                errors.add("titulo", obligatorio("titulo"));
            }
        }
    }

    match &payload.prioridad_id {
        PatchField::Set(id) => {
            if !catalogos.prioridad_exists(*id).await? {
                errors.add(
                    "prioridad_id",
                    ValidationError::new("inexistente")
                        .with_message(Cow::Borrowed("La prioridad especificada no existe.")),
                );
            }
        }
        PatchField::Null => match mode {
            ValidationMode::Create => errors.add("prioridad_id", obligatorio("prioridad_id")),
            ValidationMode::Update => errors.add("prioridad_id", no_nulo("prioridad_id")),
        },
        PatchField::Omitted => {
            if mode == ValidationMode::Create {
                errors.add("prioridad_id", obligatorio("prioridad_id"));
            }
        }
    }

    match &payload.estado_id {
        PatchField::Set(id) => {
            if !catalogos.estado_exists(*id).await? {
                errors.add(
                    "estado_id",
                    ValidationError::new("inexistente")
                        .with_message(Cow::Borrowed("El estado especificado no existe.")),
                );
            }
        }
        PatchField::Null => match mode {
            ValidationMode::Create => errors.add("estado_id", obligatorio("estado_id")),
            ValidationMode::Update => errors.add("estado_id", no_nulo("estado_id")),
        },
        PatchField::Omitted => {
            if mode == ValidationMode::Create {
                errors.add("estado_id", obligatorio("estado_id"));
            }
        }
    }

    if let PatchField::Set(fecha) = &payload.fecha_vencimiento {
        if parse_fecha(fecha).is_err() {
            errors.add(
                "fecha_vencimiento",
                ValidationError::new("formato").with_message(Cow::Borrowed(
                    "Formato de fecha inválido. Use YYYY-MM-DD.",
                )),
            );
        }
    }

    // descripcion es anulable y de texto libre, no se valida.

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
