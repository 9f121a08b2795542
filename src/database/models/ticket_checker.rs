use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered ticket checker ("tc"). Rows are written once at registration
/// and never mutated or deleted afterward; `email` and `api_key` are unique
/// across all users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketChecker {
    pub id: i64,
    pub trainid: String,
    pub tcid: String,
    pub name: String,
    pub email: String,
    pub zone: String,
    pub api_key: String,
}
