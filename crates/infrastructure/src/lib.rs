pub mod database;

pub use database::sqlite::{
    connect, run_migrations, SqliteCatalogoRepository, SqliteTareaRepository,
};
