pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use tareas_errors::{TareasError, TareasResult};
pub use value_objects::*;
