use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::trains::TrainStore;
use crate::error::ApiError;
use crate::handlers::validate::{has_text, require_fields};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCoachRequest {
    #[serde(default)]
    pub coach: Option<CoachPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CoachPayload {
    #[serde(default)]
    pub coachid: Option<String>,
    #[serde(default)]
    pub no_of_penalty: Option<i64>,
}

/// GET /:id/coaches - every coach recorded for the train.
pub async fn coaches_list(
    State(state): State<AppState>,
    Path(trainid): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let coaches = TrainStore::new(state.pool.clone())
        .coaches_for(trainid)
        .await?;
    Ok(Json(json!({ "error": false, "coaches": coaches })))
}

/// POST /trains/:id/coaches - record a coach under the train in the path.
pub async fn coach_create(
    State(state): State<AppState>,
    Path(trainid): Path<i64>,
    Json(body): Json<CreateCoachRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(payload) = body.coach else {
        return Err(ApiError::bad_request(
            "Required field(s) coach is missing or empty",
        ));
    };

    require_fields(&[
        ("coachid", has_text(&payload.coachid)),
        ("no_of_penalty", payload.no_of_penalty.is_some()),
    ])?;

    match TrainStore::new(state.pool.clone())
        .add_coach(
            trainid,
            payload.coachid.as_deref().unwrap(),
            payload.no_of_penalty.unwrap(),
        )
        .await
    {
        Ok(coach_id) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "error": false,
                "message": "Coach added successfully",
                "coach_id": coach_id,
            })),
        )),
        Err(e) => {
            tracing::error!("coach create failed: {}", e);
            Ok((
                StatusCode::OK,
                Json(json!({ "error": true, "message": "Failed to add coach. Please try again" })),
            ))
        }
    }
}
