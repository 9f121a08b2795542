pub mod manager;
pub mod models;
pub mod trains;
pub mod users;

pub use manager::{connect, health_check, init_schema, DatabaseError};
