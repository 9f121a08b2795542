use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::database::users::UserStore;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity resolved by the request gate, bound per-request
/// via extensions. Handlers read it with `Extension<AuthUser>`.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: i64,
}

/// Per-request authentication gate for protected routes.
///
/// The designated header carries the raw api key with no scheme prefix. A
/// missing header short-circuits with 400 and an unknown key with 401; in
/// both cases the handler never runs. On success the resolved user id rides
/// along in the request extensions.
pub async fn api_key_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = extract_api_key(&headers)?;

    let users = UserStore::new(state.pool.clone());
    if !users.api_key_exists(&api_key).await? {
        return Err(ApiError::unauthorized("Access Denied. Invalid Api key"));
    }

    // The key was validated just above; a row vanishing between the two
    // lookups still rejects cleanly.
    let user_id = users
        .find_id_by_api_key(&api_key)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Access Denied. Invalid Api key"))?;

    request.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(request).await)
}

fn extract_api_key(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get("authorization")
        .ok_or_else(|| ApiError::bad_request("Api key is missing"))?;

    let key = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Api key is missing"))?
        .trim();

    if key.is_empty() {
        return Err(ApiError::bad_request("Api key is missing"));
    }

    Ok(key.to_string())
}
