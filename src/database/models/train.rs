use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The primary trackable resource. `trainid` is assigned by the store on
/// insert; rows are replaced in full by updates and never deleted.
/// `last_date` and `last_time` are opaque strings end to end.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Train {
    pub trainid: i64,
    pub name: String,
    pub last_date: String,
    pub last_time: String,
    pub no_of_penalty: i64,
}
