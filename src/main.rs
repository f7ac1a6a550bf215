use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod config;
mod shutdown;

use app::Application;
use config::AppConfig;
use shutdown::ShutdownManager;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("tareas")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Servicio HTTP de gestión de tareas")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Ruta del fichero de configuración"),
        )
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDR")
                .help("Dirección de escucha (sobrescribe la configuración)"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Nivel de log")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("info"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("Formato de log")
                .value_parser(["json", "pretty"])
                .default_value("pretty"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config");
    let bind_override = matches.get_one::<String>("bind");
    let log_level = matches.get_one::<String>("log-level").unwrap();
    let log_format = matches.get_one::<String>("log-format").unwrap();

    init_logging(log_level, log_format)?;

    info!("arrancando el servicio de tareas");
    if let Some(path) = config_path {
        info!("fichero de configuración: {path}");
    }

    let mut config = AppConfig::load(config_path.map(String::as_str))
        .context("no se pudo cargar la configuración")?;

    if let Some(bind) = bind_override {
        config.api.bind_address = bind.clone();
        config.validate()?;
    }

    let app = Application::new(&config).await?;

    let shutdown_manager = ShutdownManager::new();

    let app_handle = {
        let app = Arc::new(app);
        let shutdown_rx = shutdown_manager.subscribe().await;

        tokio::spawn(async move {
            if let Err(e) = app.run(shutdown_rx).await {
                error!("fallo al ejecutar la aplicación: {e}");
            }
        })
    };

    wait_for_shutdown_signal().await;

    info!("señal de cierre recibida, iniciando cierre ordenado...");

    shutdown_manager.shutdown().await;

    match tokio::time::timeout(Duration::from_secs(30), app_handle).await {
        Ok(result) => {
            if let Err(e) = result {
                error!("error durante el cierre de la aplicación: {e}");
            } else {
                info!("aplicación cerrada ordenadamente");
            }
        }
        Err(_) => {
            warn!("el cierre superó el tiempo máximo, saliendo a la fuerza");
        }
    }

    info!("servicio de tareas detenido");
    Ok(())
}

fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("no se pudo inicializar el log en formato JSON")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("no se pudo inicializar el log en formato pretty")?;
        }
        _ => {
            return Err(anyhow::anyhow!("formato de log no soportado: {log_format}"));
        }
    }

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("no se pudo instalar el manejador de Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("no se pudo instalar el manejador de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("recibido Ctrl+C");
        },
        _ = terminate => {
            info!("recibido SIGTERM");
        },
    }
}
