use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A coach belonging to a train, with its own penalty counter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coach {
    pub trainid: i64,
    pub coachid: String,
    pub no_of_penalty: i64,
}
