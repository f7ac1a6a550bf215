pub mod catalogos;
pub mod health;
pub mod tareas;
