use sqlx::SqlitePool;

use super::manager::DatabaseError;
use super::models::{Coach, Train};

/// Train fields as submitted by callers; `trainid` is store-assigned.
#[derive(Debug, Clone)]
pub struct TrainFields {
    pub name: String,
    pub last_date: String,
    pub last_time: String,
    pub no_of_penalty: i64,
}

/// Result of a full-field update. An existing id always reports `Updated`,
/// including when the submitted values equal the current row; an unknown id
/// reports `NotFound`. The existence check happens before the UPDATE so the
/// two cases never collapse into one "zero rows affected" result.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Repository for trains, their coaches and the user-train association.
pub struct TrainStore {
    pool: SqlitePool,
}

impl TrainStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a train and the association row recording which user created
    /// it, as one transaction. Returns the store-assigned train id; if the
    /// association insert fails the train row is rolled back with it, so
    /// callers never see an orphaned id.
    pub async fn create(&self, user_id: i64, fields: &TrainFields) -> Result<i64, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO trains (name, last_date, last_time, no_of_penalty)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&fields.last_date)
        .bind(&fields.last_time)
        .bind(fields.no_of_penalty)
        .execute(&mut *tx)
        .await?;

        let train_id = result.last_insert_rowid();

        sqlx::query("INSERT INTO user_trains (user_id, train_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(train_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(train_id)
    }

    pub async fn get(&self, trainid: i64) -> Result<Option<Train>, DatabaseError> {
        let train = sqlx::query_as::<_, Train>(
            "SELECT trainid, name, last_date, last_time, no_of_penalty
             FROM trains WHERE trainid = ?",
        )
        .bind(trainid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(train)
    }

    /// Every train, freshly queried per call. The user-train association is
    /// deliberately ignored here: all trains are visible to any
    /// authenticated caller.
    pub async fn list_all(&self) -> Result<Vec<Train>, DatabaseError> {
        let trains = sqlx::query_as::<_, Train>(
            "SELECT trainid, name, last_date, last_time, no_of_penalty FROM trains",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(trains)
    }

    pub async fn coaches_for(&self, trainid: i64) -> Result<Vec<Coach>, DatabaseError> {
        let coaches = sqlx::query_as::<_, Coach>(
            "SELECT trainid, coachid, no_of_penalty FROM coaches WHERE trainid = ?",
        )
        .bind(trainid)
        .fetch_all(&self.pool)
        .await?;
        Ok(coaches)
    }

    pub async fn add_coach(
        &self,
        trainid: i64,
        coachid: &str,
        no_of_penalty: i64,
    ) -> Result<i64, DatabaseError> {
        let result =
            sqlx::query("INSERT INTO coaches (trainid, coachid, no_of_penalty) VALUES (?, ?, ?)")
                .bind(trainid)
                .bind(coachid)
                .bind(no_of_penalty)
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Full-field replace by primary key.
    pub async fn update(
        &self,
        trainid: i64,
        fields: &TrainFields,
    ) -> Result<UpdateOutcome, DatabaseError> {
        if self.get(trainid).await?.is_none() {
            return Ok(UpdateOutcome::NotFound);
        }

        sqlx::query(
            "UPDATE trains SET name = ?, last_date = ?, last_time = ?, no_of_penalty = ?
             WHERE trainid = ?",
        )
        .bind(&fields.name)
        .bind(&fields.last_date)
        .bind(&fields.last_time)
        .bind(fields.no_of_penalty)
        .bind(trainid)
        .execute(&self.pool)
        .await?;

        Ok(UpdateOutcome::Updated)
    }
}
