use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::database::users::{InsertOutcome, NewTicketChecker, UserStore};
use crate::error::ApiError;
use crate::handlers::validate::{has_text, require_fields, validate_email};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub trainid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

/// POST /register - create a user and mint their api key.
///
/// Success and failure both answer 201; callers tell them apart by the
/// `error` flag in the body.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_fields(&[
        ("trainid", has_text(&body.trainid)),
        ("name", has_text(&body.name)),
        ("email", has_text(&body.email)),
        ("zone", has_text(&body.zone)),
    ])?;

    let email = body.email.as_deref().unwrap();
    validate_email(email)?;

    let users = UserStore::new(state.pool.clone());

    // Advisory pre-check; the UNIQUE constraint on email settles the race
    // between two concurrent registrations.
    match users.user_exists(email).await {
        Ok(true) => return Ok(already_existed()),
        Ok(false) => {}
        Err(e) => {
            tracing::error!("registration existence check failed: {}", e);
            return Ok(register_failed());
        }
    }

    let api_key = match auth::issue_api_key(&users).await {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("api key issue failed: {}", e);
            return Ok(register_failed());
        }
    };

    let new = NewTicketChecker {
        trainid: body.trainid.unwrap(),
        tcid: auth::generate_tcid(),
        name: body.name.unwrap(),
        email: email.to_string(),
        zone: body.zone.unwrap(),
    };

    match users.insert_user(&new, &api_key).await {
        Ok(InsertOutcome::Inserted) => Ok((
            StatusCode::CREATED,
            Json(json!({ "error": false, "message": "You are successfully registered" })),
        )),
        Ok(InsertOutcome::DuplicateEmail) => Ok(already_existed()),
        Err(e) => {
            tracing::error!("user insert failed: {}", e);
            Ok(register_failed())
        }
    }
}

fn already_existed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "error": true, "message": "Sorry, this email already existed" })),
    )
}

fn register_failed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "error": true, "message": "Oops! An error occurred while registering" })),
    )
}

/// POST /login - email and zone in, profile and api key out.
///
/// Zone is required in the request but never compared against the stored
/// value; only email existence decides the outcome. Kept as-is, see
/// DESIGN.md.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_fields(&[
        ("email", has_text(&body.email)),
        ("zone", has_text(&body.zone)),
    ])?;

    let email = body.email.as_deref().unwrap();
    let users = UserStore::new(state.pool.clone());

    let found = match users.check_login(email).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("login check failed: {}", e);
            return Ok(login_error());
        }
    };

    if !found {
        return Ok((
            StatusCode::OK,
            Json(json!({ "error": true, "message": "Login failed. Incorrect credentials" })),
        ));
    }

    match users.find_by_email(email).await {
        Ok(Some(user)) => Ok((
            StatusCode::OK,
            Json(json!({
                "error": false,
                "name": user.name,
                "email": user.email,
                "apiKey": user.api_key,
            })),
        )),
        Ok(None) => Ok(login_error()),
        Err(e) => {
            tracing::error!("login lookup failed: {}", e);
            Ok(login_error())
        }
    }
}

fn login_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "error": true, "message": "An error occurred. Please try again" })),
    )
}
