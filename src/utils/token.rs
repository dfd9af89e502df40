use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::config::get_config;
use crate::error::Result;
use crate::middleware::auth::Claims;

pub fn issue_token(user_id: Uuid, role: &str) -> Result<String> {
    let config = get_config();
    let exp = (Utc::now() + Duration::hours(config.token_ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        role: Some(role.to_string()),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}
