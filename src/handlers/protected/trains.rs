use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::trains::{TrainFields, TrainStore, UpdateOutcome};
use crate::error::ApiError;
use crate::handlers::validate::{has_text, require_fields};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTrainRequest {
    #[serde(default)]
    pub train: Option<TrainPayload>,
}

#[derive(Debug, Deserialize)]
pub struct TrainPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_date: Option<String>,
    #[serde(default)]
    pub last_time: Option<String>,
    #[serde(default)]
    pub no_of_penalty: Option<i64>,
}

/// GET /trains - every train, unfiltered by creator.
pub async fn trains_list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let trains = TrainStore::new(state.pool.clone()).list_all().await?;
    Ok(Json(json!({ "error": false, "trains": trains })))
}

/// GET /trains/:id - point lookup; 404 when the id is unknown.
pub async fn train_show(
    State(state): State<AppState>,
    Path(trainid): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let train = TrainStore::new(state.pool.clone()).get(trainid).await?;

    match train {
        Some(train) => Ok((
            StatusCode::OK,
            Json(json!({
                "error": false,
                "trainid": train.trainid,
                "name": train.name,
                "last_date": train.last_date,
                "last_time": train.last_time,
                "no_of_penalty": train.no_of_penalty,
            })),
        )),
        None => Err(ApiError::not_found("The requested resource doesn't exist")),
    }
}

/// POST /trains - create a train under the calling user.
pub async fn train_create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateTrainRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(payload) = body.train else {
        return Err(ApiError::bad_request(
            "Required field(s) train is missing or empty",
        ));
    };
    let fields = train_fields(payload)?;

    match TrainStore::new(state.pool.clone())
        .create(auth_user.id, &fields)
        .await
    {
        Ok(train_id) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "error": false,
                "message": "Train added successfully",
                "train_id": train_id,
            })),
        )),
        Err(e) => {
            tracing::error!("train create failed: {}", e);
            Ok((
                StatusCode::OK,
                Json(json!({ "error": true, "message": "Failed to add train. Please try again" })),
            ))
        }
    }
}

/// PUT /trains/:id - full-field replace. An unknown id reports the
/// failure body on 200 rather than a 404.
pub async fn train_update(
    State(state): State<AppState>,
    Path(trainid): Path<i64>,
    Json(body): Json<TrainPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = train_fields(body)?;

    match TrainStore::new(state.pool.clone())
        .update(trainid, &fields)
        .await
    {
        Ok(UpdateOutcome::Updated) => Ok((
            StatusCode::OK,
            Json(json!({ "error": false, "message": "Train updated successfully" })),
        )),
        Ok(UpdateOutcome::NotFound) => Ok(update_failed()),
        Err(e) => {
            tracing::error!("train update failed: {}", e);
            Ok(update_failed())
        }
    }
}

fn train_fields(payload: TrainPayload) -> Result<TrainFields, ApiError> {
    require_fields(&[
        ("name", has_text(&payload.name)),
        ("last_date", has_text(&payload.last_date)),
        ("last_time", has_text(&payload.last_time)),
        ("no_of_penalty", payload.no_of_penalty.is_some()),
    ])?;

    Ok(TrainFields {
        name: payload.name.unwrap(),
        last_date: payload.last_date.unwrap(),
        last_time: payload.last_time.unwrap(),
        no_of_penalty: payload.no_of_penalty.unwrap(),
    })
}

fn update_failed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "error": true, "message": "Train failed to update. Please try again!" })),
    )
}
