//! Configuración de la aplicación: fichero TOML opcional con overrides por
//! variables de entorno con prefijo `TAREAS` (por ejemplo
//! `TAREAS__API__BIND_ADDRESS`).

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind_address: String,
    pub cors_enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://tareas.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            cors_enabled: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración. El fichero indicado explícitamente debe
    /// existir; las rutas por defecto son opcionales.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(anyhow::anyhow!("el fichero de configuración no existe: {path}"));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else {
            for path in ["config/tareas.toml", "tareas.toml"] {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    break;
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TAREAS")
                .separator("__")
                .try_parsing(true),
        );

        let defaults = AppConfig::default();
        let config: AppConfig = builder
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("api.bind_address", defaults.api.bind_address)?
            .set_default("api.cors_enabled", defaults.api.cors_enabled)?
            .build()
            .context("no se pudo construir la configuración")?
            .try_deserialize()
            .context("configuración inválida")?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(anyhow::anyhow!("database.url no puede estar vacío"));
        }
        if !self.database.url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "database.url debe empezar por sqlite: (recibido: {})",
                self.database.url
            ));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("database.max_connections debe ser mayor que 0"));
        }
        if self.api.bind_address.is_empty() || !self.api.bind_address.contains(':') {
            return Err(anyhow::anyhow!(
                "api.bind_address debe tener el formato host:puerto (recibido: {})",
                self.api.bind_address
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.database.url, "sqlite://tareas.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.api.bind_address, "127.0.0.1:5000");
        assert!(config.api.cors_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let mut config = AppConfig::default();
        config.database.url = "postgresql://localhost/tareas".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_connections() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bind_address_without_port() {
        let mut config = AppConfig::default();
        config.api.bind_address = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some("/no/existe/tareas.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config.database.url, deserialized.database.url);
        assert_eq!(config.api.bind_address, deserialized.api.bind_address);
    }
}
