use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tareas_domain::{entities::CatalogoItem, repositories::CatalogoRepository};
use tareas_errors::TareasResult;
use tracing::instrument;

pub struct SqliteCatalogoRepository {
    pool: SqlitePool,
}

impl SqliteCatalogoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn list_catalogo(&self, table: &str) -> TareasResult<Vec<CatalogoItem>> {
        // `table` solo toma valores internos, nunca entrada del cliente.
        let rows = sqlx::query(&format!("SELECT id, nombre FROM {table} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(CatalogoItem {
                    id: row.try_get("id")?,
                    nombre: row.try_get("nombre")?,
                })
            })
            .collect()
    }

    async fn exists_in(&self, table: &str, id: i64) -> TareasResult<bool> {
        let exists: bool =
            sqlx::query_scalar(&format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl CatalogoRepository for SqliteCatalogoRepository {
    #[instrument(skip(self))]
    async fn list_prioridades(&self) -> TareasResult<Vec<CatalogoItem>> {
        self.list_catalogo("prioridades").await
    }

    #[instrument(skip(self))]
    async fn list_estados(&self) -> TareasResult<Vec<CatalogoItem>> {
        self.list_catalogo("estados").await
    }

    async fn prioridad_exists(&self, id: i64) -> TareasResult<bool> {
        self.exists_in("prioridades", id).await
    }

    async fn estado_exists(&self, id: i64) -> TareasResult<bool> {
        self.exists_in("estados", id).await
    }
}
