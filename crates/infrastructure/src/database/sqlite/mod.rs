use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use tareas_errors::TareasResult;
use tracing::debug;

mod sqlite_catalogo_repository;
mod sqlite_tarea_repository;

pub use sqlite_catalogo_repository::SqliteCatalogoRepository;
pub use sqlite_tarea_repository::SqliteTareaRepository;

/// Abre el pool SQLite con claves foráneas activas y modo WAL.
pub async fn connect(database_url: &str, max_connections: u32) -> TareasResult<SqlitePool> {
    debug!("Abriendo base de datos SQLite: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Crea el esquema y siembra los catálogos. Idempotente: se ejecuta en cada
/// arranque.
pub async fn run_migrations(pool: &SqlitePool) -> TareasResult<()> {
    debug!("Ejecutando migraciones SQLite");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS prioridades (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE CHECK (length(nombre) BETWEEN 1 AND 20)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS estados (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL UNIQUE CHECK (length(nombre) BETWEEN 1 AND 20)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Política explícita ante borrado de catálogos: RESTRICT.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tareas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            titulo TEXT NOT NULL CHECK (length(titulo) BETWEEN 1 AND 100),
            descripcion TEXT,
            prioridad_id INTEGER NOT NULL
                REFERENCES prioridades(id) ON DELETE RESTRICT,
            estado_id INTEGER NOT NULL DEFAULT 1
                REFERENCES estados(id) ON DELETE RESTRICT,
            fecha_creacion DATETIME NOT NULL,
            fecha_vencimiento DATE
        )
        "#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_tareas_prioridad_id ON tareas(prioridad_id)",
        "CREATE INDEX IF NOT EXISTS idx_tareas_estado_id ON tareas(estado_id)",
        "CREATE INDEX IF NOT EXISTS idx_tareas_fecha_creacion ON tareas(fecha_creacion)",
    ];
    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    seed_catalogos(pool).await?;

    debug!("Migraciones SQLite completadas");
    Ok(())
}

async fn seed_catalogos(pool: &SqlitePool) -> TareasResult<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO prioridades (id, nombre)
        VALUES (1, 'Baja'), (2, 'Media'), (3, 'Alta')
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO estados (id, nombre)
        VALUES (1, 'Pendiente'), (2, 'En Progreso'), (3, 'Completada')
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
