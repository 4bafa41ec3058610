use crate::core::{AppError, AppState};
use crate::entities::{User, UserRole};
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: String,
    pub name: String,
}

#[instrument(skip(secret), fields(user_id = %id))]
pub fn encode_jwt(id: &str, name: &str, secret: &str) -> Result<String, AppError> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(24);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        id: id.to_string(),
        name: name.to_string(),
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        AppError::internal_server_error("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, AppError> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| {
        info!("JWT token decoded successfully for user: {}", data.claims.id);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Unable to decode token")
    })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden(
                "Please add the JWT token to the header",
            ));
        }
    };
    let mut header = auth_header.split_whitespace();
    let token = match (header.next(), header.next()) {
        (Some("Bearer"), Some(token)) => token,
        _ => {
            warn!("Authorization header is not a bearer token");
            return Err(AppError::unauthorized("Expected a Bearer token"));
        }
    };
    let token_data = decode_jwt(token, &state.jwt_secret)?;

    // Recupero l'utente dallo store: il token non basta, l'utente potrebbe essere stato rimosso
    let current_user = match state.store.read(|d| d.user(&token_data.claims.id).cloned()).await {
        Some(user) if user.is_active() => {
            info!("User authenticated: {}", user.id);
            user
        }
        Some(user) => {
            warn!("User {} is not active", user.id);
            return Err(AppError::forbidden("Your account is awaiting approval"));
        }
        None => {
            warn!("User not found in store: {}", token_data.claims.id);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Middleware che verifica che l'utente corrente sia admin.
/// Va applicato dopo l'authentication_middleware.
#[instrument(skip(req, next))]
pub async fn admin_middleware(req: Request, next: Next) -> Result<Response<Body>, AppError> {
    debug!("Running admin middleware");
    let current_user = req.extensions().get::<User>().ok_or_else(|| {
        warn!("User not found in request extensions");
        AppError::unauthorized("User not authenticated")
    })?;

    require_role(current_user, &[UserRole::Admin])?;

    Ok(next.run(req).await)
}

/// Helper function per verificare che un utente abbia uno dei ruoli richiesti
///
/// # Returns
/// * `Ok(())` se il ruolo è permesso
/// * `Err(AppError)` se il ruolo non è tra quelli permessi
pub fn require_role(user: &User, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&user.role) {
        warn!(
            "User {} has insufficient role {:?}, required one of: {:?}",
            user.id, user.role, allowed_roles
        );
        return Err(AppError::forbidden("Insufficient role").with_details(format!(
            "This action requires one of the following roles: {:?}",
            allowed_roles
        )));
    }
    Ok(())
}

/// Hash a password using bcrypt with default cost
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    Ok(hash)
}

/// Verify if target_password matches the stored hashed password
pub fn verify_password(target_password: &str, hash: &str) -> bool {
    bcrypt::verify(target_password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn password_hash_verifies_only_the_same_password() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret", "not-a-hash"));
    }

    #[test]
    fn token_round_trip_keeps_identity() {
        let token = encode_jwt("user-0", "Me", "secret").unwrap();
        let data = decode_jwt(&token, "secret").unwrap();
        assert_eq!(data.claims.id, "user-0");
        assert_eq!(data.claims.name, "Me");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = encode_jwt("user-0", "Me", "secret").unwrap();
        let err = decode_jwt(&token, "another").unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn require_role_rejects_plain_users() {
        let mut user = User::local_default();
        assert!(require_role(&user, &[UserRole::Admin]).is_ok());
        user.role = UserRole::User;
        let err = require_role(&user, &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
