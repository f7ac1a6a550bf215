use thiserror::Error;

#[derive(Debug, Error)]
pub enum TareasError {
    #[error("error de base de datos: {0}")]
    Database(#[from] sqlx::Error),
    #[error("operación de base de datos fallida: {0}")]
    DatabaseOperation(String),
    #[error("tarea no encontrada: {id}")]
    TareaNotFound { id: i64 },
    #[error("error de serialización: {0}")]
    Serialization(String),
    #[error("error de configuración: {0}")]
    Configuration(String),
    #[error("error interno: {0}")]
    Internal(String),
}

pub type TareasResult<T> = Result<T, TareasError>;

impl TareasError {
    pub fn database_error<S: Into<String>>(msg: S) -> Self {
        Self::DatabaseOperation(msg.into())
    }
    pub fn tarea_not_found(id: i64) -> Self {
        Self::TareaNotFound { id }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TareaNotFound { .. })
    }
    /// Message safe to show to a client; storage detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::TareaNotFound { id } => format!("Tarea con id {id} no encontrada"),
            _ => "Error interno del servidor".to_string(),
        }
    }
}

impl From<serde_json::Error> for TareasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for TareasError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests;
