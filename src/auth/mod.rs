use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::database::users::UserStore;
use crate::database::DatabaseError;

/// Mint one opaque bearer token: a v4 UUID plus a fresh RNG nonce, hashed to
/// a fixed-length lowercase hex string. Practically unique across the
/// lifetime of the service and carries no structure a caller could guess.
pub fn generate_api_key() -> String {
    let mut nonce = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(Uuid::new_v4().as_bytes());
    hasher.update(nonce);
    hex::encode(hasher.finalize())
}

/// Issue a key that is unique among stored credentials: re-check against the
/// credential store and regenerate on collision.
pub async fn issue_api_key(users: &UserStore) -> Result<String, DatabaseError> {
    loop {
        let key = generate_api_key();
        if !users.api_key_exists(&key).await? {
            return Ok(key);
        }
    }
}

/// The random 10-digit numeric handle assigned to a new user at
/// registration.
pub fn generate_tcid() -> String {
    use rand::Rng;
    rand::thread_rng()
        .gen_range(1_111_111_111i64..=9_999_999_999i64)
        .to_string()
}
