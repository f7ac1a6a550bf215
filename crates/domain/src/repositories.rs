use async_trait::async_trait;

use crate::{
    entities::{CatalogoItem, NuevaTarea, Tarea, TareaPatch},
    TareasResult,
};

/// Repositorio de tareas: cada operación mutante es una unidad de trabajo
/// atómica contra el almacenamiento (commit o rollback, sin estados
/// intermedios visibles).
#[async_trait]
pub trait TareaRepository: Send + Sync {
    /// Inserta una tarea con `fecha_creacion` asignada por el servidor y
    /// devuelve la fila hidratada.
    async fn create(&self, nueva: &NuevaTarea) -> TareasResult<Tarea>;

    /// Busca por id; `None` si no existe.
    async fn get_by_id(&self, id: i64) -> TareasResult<Option<Tarea>>;

    /// Todas las tareas, más recientes primero.
    async fn list(&self) -> TareasResult<Vec<Tarea>>;

    /// Aplica una actualización parcial; `TareaNotFound` si el id no existe.
    async fn update(&self, id: i64, patch: &TareaPatch) -> TareasResult<Tarea>;

    /// Borrado físico; `TareaNotFound` si el id no existe.
    async fn delete(&self, id: i64) -> TareasResult<()>;
}

/// Acceso de solo lectura a los catálogos de referencia. Se pasa como
/// colaborador explícito al validador en lugar de un estado global.
#[async_trait]
pub trait CatalogoRepository: Send + Sync {
    async fn list_prioridades(&self) -> TareasResult<Vec<CatalogoItem>>;

    async fn list_estados(&self) -> TareasResult<Vec<CatalogoItem>>;

    async fn prioridad_exists(&self, id: i64) -> TareasResult<bool>;

    async fn estado_exists(&self, id: i64) -> TareasResult<bool>;
}
