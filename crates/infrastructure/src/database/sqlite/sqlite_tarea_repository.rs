use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tareas_domain::{
    entities::{NuevaTarea, Tarea, TareaPatch},
    repositories::TareaRepository,
};
use tareas_errors::{TareasError, TareasResult};
use tracing::{debug, instrument};

/// Columnas de tarea con los nombres de catálogo hidratados. LEFT JOIN para
/// que una fila de catálogo ausente se sirva como nombre null en vez de
/// ocultar la tarea.
const SELECT_TAREA: &str = r#"
    SELECT t.id, t.titulo, t.descripcion,
           t.prioridad_id, p.nombre AS prioridad_nombre,
           t.estado_id, e.nombre AS estado_nombre,
           t.fecha_creacion, t.fecha_vencimiento
    FROM tareas t
    LEFT JOIN prioridades p ON p.id = t.prioridad_id
    LEFT JOIN estados e ON e.id = t.estado_id
"#;

pub struct SqliteTareaRepository {
    pool: SqlitePool,
}

impl SqliteTareaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_tarea(row: &sqlx::sqlite::SqliteRow) -> TareasResult<Tarea> {
        Ok(Tarea {
            id: row.try_get("id")?,
            titulo: row.try_get("titulo")?,
            descripcion: row.try_get("descripcion")?,
            prioridad_id: row.try_get("prioridad_id")?,
            prioridad_nombre: row.try_get("prioridad_nombre")?,
            estado_id: row.try_get("estado_id")?,
            estado_nombre: row.try_get("estado_nombre")?,
            fecha_creacion: row.try_get("fecha_creacion")?,
            fecha_vencimiento: row.try_get("fecha_vencimiento")?,
        })
    }
}

#[async_trait]
impl TareaRepository for SqliteTareaRepository {
    #[instrument(skip(self, nueva), fields(titulo = %nueva.titulo))]
    async fn create(&self, nueva: &NuevaTarea) -> TareasResult<Tarea> {
        let mut tx = self.pool.begin().await?;

        // fecha_creacion la asigna el servidor, exactamente una vez.
        let fecha_creacion = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tareas (titulo, descripcion, prioridad_id, estado_id,
                                fecha_creacion, fecha_vencimiento)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&nueva.titulo)
        .bind(&nueva.descripcion)
        .bind(nueva.prioridad_id)
        .bind(nueva.estado_id)
        .bind(fecha_creacion)
        .bind(nueva.fecha_vencimiento)
        .fetch_one(&mut *tx)
        .await?;

        let row = sqlx::query(&format!("{SELECT_TAREA} WHERE t.id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let tarea = Self::row_to_tarea(&row)?;

        tx.commit().await?;

        debug!("Tarea creada: id {}, título '{}'", tarea.id, tarea.titulo);
        Ok(tarea)
    }

    #[instrument(skip(self), fields(tarea_id = %id))]
    async fn get_by_id(&self, id: i64) -> TareasResult<Option<Tarea>> {
        let row = sqlx::query(&format!("{SELECT_TAREA} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_tarea(&row)?)),
            None => {
                debug!("Tarea no encontrada: id {}", id);
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> TareasResult<Vec<Tarea>> {
        // Empates de fecha_creacion resueltos por id para un orden estable.
        let rows = sqlx::query(&format!(
            "{SELECT_TAREA} ORDER BY t.fecha_creacion DESC, t.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let tareas: TareasResult<Vec<Tarea>> = rows.iter().map(Self::row_to_tarea).collect();
        let tareas = tareas?;
        debug!("Listado de tareas: {} filas", tareas.len());
        Ok(tareas)
    }

    #[instrument(skip(self, patch), fields(tarea_id = %id))]
    async fn update(&self, id: i64, patch: &TareaPatch) -> TareasResult<Tarea> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!("{SELECT_TAREA} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let mut tarea = match row {
            Some(row) => Self::row_to_tarea(&row)?,
            None => return Err(TareasError::tarea_not_found(id)),
        };

        patch.apply(&mut tarea);

        // fecha_creacion queda fuera del UPDATE: inmutable tras la inserción.
        sqlx::query(
            r#"
            UPDATE tareas
            SET titulo = $2, descripcion = $3, prioridad_id = $4,
                estado_id = $5, fecha_vencimiento = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&tarea.titulo)
        .bind(&tarea.descripcion)
        .bind(tarea.prioridad_id)
        .bind(tarea.estado_id)
        .bind(tarea.fecha_vencimiento)
        .execute(&mut *tx)
        .await?;

        // Releer con los nombres de catálogo ya coherentes con el cambio.
        let row = sqlx::query(&format!("{SELECT_TAREA} WHERE t.id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let tarea = Self::row_to_tarea(&row)?;

        tx.commit().await?;

        debug!("Tarea actualizada: id {}", tarea.id);
        Ok(tarea)
    }

    #[instrument(skip(self), fields(tarea_id = %id))]
    async fn delete(&self, id: i64) -> TareasResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM tareas WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TareasError::tarea_not_found(id));
        }

        tx.commit().await?;

        debug!("Tarea eliminada: id {}", id);
        Ok(())
    }
}
