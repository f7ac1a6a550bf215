use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::PatchField;

/// Estado asignado a una tarea nueva cuando el cliente no envía `estado_id`.
/// The create handler applies it before validation runs, so the default and
/// the required-field rule never disagree.
pub const DEFAULT_ESTADO_ID: i64 = 1;

/// Tarea tal como se persiste y se sirve: incluye los nombres de catálogo
/// hidratados por LEFT JOIN (`None` si la fila de catálogo faltara).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tarea {
    pub id: i64,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub prioridad_id: i64,
    pub prioridad_nombre: Option<String>,
    pub estado_id: i64,
    pub estado_nombre: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_vencimiento: Option<NaiveDate>,
}

/// Campos necesarios para insertar una tarea. `fecha_creacion` nunca viene
/// del cliente: la asigna el repositorio al insertar.
#[derive(Debug, Clone, PartialEq)]
pub struct NuevaTarea {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub prioridad_id: i64,
    pub estado_id: i64,
    pub fecha_vencimiento: Option<NaiveDate>,
}

impl NuevaTarea {
    pub fn new(
        titulo: &str,
        descripcion: Option<String>,
        prioridad_id: i64,
        estado_id: i64,
        fecha_vencimiento: Option<NaiveDate>,
    ) -> Self {
        Self {
            titulo: titulo.trim().to_string(),
            descripcion,
            prioridad_id,
            estado_id,
            fecha_vencimiento,
        }
    }
}

/// Actualización parcial: `None`/`Omitted` conserva el valor almacenado.
/// Los campos anulables usan [`PatchField`] para distinguir "limpiar" de
/// "no tocar".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TareaPatch {
    pub titulo: Option<String>,
    pub descripcion: PatchField<String>,
    pub prioridad_id: Option<i64>,
    pub estado_id: Option<i64>,
    pub fecha_vencimiento: PatchField<NaiveDate>,
}

impl TareaPatch {
    pub fn is_empty(&self) -> bool {
        self.titulo.is_none()
            && !self.descripcion.is_provided()
            && self.prioridad_id.is_none()
            && self.estado_id.is_none()
            && !self.fecha_vencimiento.is_provided()
    }

    /// Overwrites exactly the provided fields. `titulo` is re-trimmed;
    /// `fecha_creacion` is never touched. Catalog names may go stale here,
    /// the repository re-hydrates them after writing.
    pub fn apply(&self, tarea: &mut Tarea) {
        if let Some(titulo) = &self.titulo {
            tarea.titulo = titulo.trim().to_string();
        }
        tarea.descripcion = self.descripcion.clone().apply_to(tarea.descripcion.take());
        if let Some(prioridad_id) = self.prioridad_id {
            tarea.prioridad_id = prioridad_id;
        }
        if let Some(estado_id) = self.estado_id {
            tarea.estado_id = estado_id;
        }
        tarea.fecha_vencimiento = self
            .fecha_vencimiento
            .clone()
            .apply_to(tarea.fecha_vencimiento);
    }
}

/// Fila de catálogo (`prioridades` / `estados`) serializada como `{id, nombre}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogoItem {
    pub id: i64,
    pub nombre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarea_base() -> Tarea {
        Tarea {
            id: 1,
            titulo: "Comprar leche".to_string(),
            descripcion: Some("entera".to_string()),
            prioridad_id: 2,
            prioridad_nombre: Some("Media".to_string()),
            estado_id: 1,
            estado_nombre: Some("Pendiente".to_string()),
            fecha_creacion: Utc::now(),
            fecha_vencimiento: Some(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap()),
        }
    }

    #[test]
    fn test_nueva_tarea_trims_titulo() {
        let nueva = NuevaTarea::new("  Comprar leche  ", None, 1, DEFAULT_ESTADO_ID, None);
        assert_eq!(nueva.titulo, "Comprar leche");
    }

    #[test]
    fn test_patch_empty_changes_nothing() {
        let mut tarea = tarea_base();
        let original = tarea.clone();
        let patch = TareaPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut tarea);
        assert_eq!(tarea, original);
    }

    #[test]
    fn test_patch_single_field() {
        let mut tarea = tarea_base();
        let patch = TareaPatch {
            descripcion: PatchField::Set("desnatada".to_string()),
            ..Default::default()
        };
        patch.apply(&mut tarea);
        assert_eq!(tarea.descripcion, Some("desnatada".to_string()));
        // everything else untouched
        assert_eq!(tarea.titulo, "Comprar leche");
        assert_eq!(tarea.prioridad_id, 2);
        assert_eq!(tarea.estado_id, 1);
        assert!(tarea.fecha_vencimiento.is_some());
    }

    #[test]
    fn test_patch_retrims_titulo() {
        let mut tarea = tarea_base();
        let patch = TareaPatch {
            titulo: Some("  Vender leche  ".to_string()),
            ..Default::default()
        };
        patch.apply(&mut tarea);
        assert_eq!(tarea.titulo, "Vender leche");
    }

    #[test]
    fn test_patch_null_clears_fecha_vencimiento() {
        let mut tarea = tarea_base();
        let patch = TareaPatch {
            fecha_vencimiento: PatchField::Null,
            ..Default::default()
        };
        patch.apply(&mut tarea);
        assert_eq!(tarea.fecha_vencimiento, None);
    }

    #[test]
    fn test_patch_omitted_keeps_fecha_vencimiento() {
        let mut tarea = tarea_base();
        let antes = tarea.fecha_vencimiento;
        let patch = TareaPatch {
            titulo: Some("Otro título".to_string()),
            ..Default::default()
        };
        patch.apply(&mut tarea);
        assert_eq!(tarea.fecha_vencimiento, antes);
    }

    #[test]
    fn test_patch_never_touches_fecha_creacion() {
        let mut tarea = tarea_base();
        let creada = tarea.fecha_creacion;
        let patch = TareaPatch {
            titulo: Some("x".to_string()),
            descripcion: PatchField::Null,
            prioridad_id: Some(3),
            estado_id: Some(2),
            fecha_vencimiento: PatchField::Null,
        };
        patch.apply(&mut tarea);
        assert_eq!(tarea.fecha_creacion, creada);
    }

    #[test]
    fn test_tarea_json_shape() {
        let mut tarea = tarea_base();
        tarea.descripcion = None;
        let json = serde_json::to_value(&tarea).unwrap();
        assert!(json["descripcion"].is_null());
        assert_eq!(json["prioridad_nombre"], "Media");
        assert_eq!(json["fecha_vencimiento"], "2026-09-15");
        // timestamp serializes with an explicit zone marker
        let creacion = json["fecha_creacion"].as_str().unwrap();
        assert!(creacion.ends_with('Z') || creacion.contains("+00:00"));
    }
}
