use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tareas_api::{create_app, AppState};
use tareas_infrastructure::{
    connect, run_migrations, SqliteCatalogoRepository, SqliteTareaRepository,
};
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{error, info};

use crate::config::AppConfig;

/// Aplicación ya cableada: pool abierto, migraciones aplicadas y router
/// montado. Solo falta servirla.
pub struct Application {
    bind_address: String,
    app: Router,
}

impl Application {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        info!("abriendo base de datos: {}", config.database.url);
        let pool = connect(&config.database.url, config.database.max_connections)
            .await
            .with_context(|| format!("no se pudo abrir la base de datos: {}", config.database.url))?;

        run_migrations(&pool)
            .await
            .context("fallo al aplicar las migraciones")?;

        let state = AppState {
            tareas: Arc::new(SqliteTareaRepository::new(pool.clone())),
            catalogos: Arc::new(SqliteCatalogoRepository::new(pool)),
        };

        Ok(Self {
            bind_address: config.api.bind_address.clone(),
            app: create_app(state, config.api.cors_enabled),
        })
    }

    /// Sirve hasta recibir la señal de cierre.
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(&self.bind_address)
            .await
            .with_context(|| format!("no se pudo enlazar la dirección: {}", self.bind_address))?;

        info!("servidor escuchando en http://{}", self.bind_address);

        let app = self.app.clone();
        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                error!("el servidor HTTP terminó con error: {e}");
            }
        });

        let _ = shutdown_rx.recv().await;
        info!("señal de cierre recibida, deteniendo el servidor HTTP");

        server_handle.abort();

        info!("servidor HTTP detenido");
        Ok(())
    }
}
