use crate::*;

#[test]
fn test_tareas_error_display() {
    let db_op = TareasError::DatabaseOperation("conexión perdida".to_string());
    assert_eq!(
        db_op.to_string(),
        "operación de base de datos fallida: conexión perdida"
    );

    let not_found = TareasError::TareaNotFound { id: 123 };
    assert_eq!(not_found.to_string(), "tarea no encontrada: 123");

    let config = TareasError::Configuration("falta database.url".to_string());
    assert_eq!(config.to_string(), "error de configuración: falta database.url");

    let internal = TareasError::Internal("algo salió mal".to_string());
    assert_eq!(internal.to_string(), "error interno: algo salió mal");
}

#[test]
fn test_helper_constructors() {
    assert!(matches!(
        TareasError::tarea_not_found(7),
        TareasError::TareaNotFound { id: 7 }
    ));
    assert!(matches!(
        TareasError::database_error("x"),
        TareasError::DatabaseOperation(_)
    ));
    assert!(matches!(
        TareasError::config_error("x"),
        TareasError::Configuration(_)
    ));
}

#[test]
fn test_is_not_found() {
    assert!(TareasError::tarea_not_found(1).is_not_found());
    assert!(!TareasError::Internal("x".to_string()).is_not_found());
}

#[test]
fn test_user_message_hides_internal_detail() {
    let not_found = TareasError::tarea_not_found(42);
    assert_eq!(not_found.user_message(), "Tarea con id 42 no encontrada");

    let db = TareasError::database_error("tabla corrupta en disco");
    assert_eq!(db.user_message(), "Error interno del servidor");
    assert!(!db.user_message().contains("tabla"));
}

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{no es json").unwrap_err();
    let err: TareasError = json_err.into();
    assert!(matches!(err, TareasError::Serialization(_)));
}

#[test]
fn test_from_sqlx_error() {
    let err: TareasError = sqlx::Error::RowNotFound.into();
    assert!(matches!(err, TareasError::Database(_)));
}

#[test]
fn test_from_anyhow_error() {
    let err: TareasError = anyhow::anyhow!("fallo inesperado").into();
    assert!(matches!(err, TareasError::Internal(_)));
}
