#![allow(dead_code)]

use axum_test::{TestRequest, TestServer};
use axum_test::http::HeaderName;
use qamar_server::core::AppState;
use qamar_server::entities::{User, UserRole, UserStatus, user::avatar_for};
use qamar_server::repositories::{AppData, Store};
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Crea un AppState per i test con uno store in memoria
///
/// # Arguments
/// * `data` - Snapshot iniziale dello stato
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test
pub fn create_test_state(data: AppData) -> Arc<AppState> {
    Arc::new(AppState::new(Store::in_memory(data), JWT_SECRET.to_string()))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = qamar_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token per testing
///
/// # Arguments
/// * `user_id` - ID dell'utente per cui generare il token
/// * `name` - Nome dell'utente
/// * `jwt_secret` - Secret key per firmare il token
///
/// # Returns
/// Token JWT valido per 24 ore
pub fn create_test_jwt(user_id: &str, name: &str, jwt_secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: String,
        name: String,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id.to_string(),
        name: name.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

/// Aggiunge alla richiesta l'header Authorization dell'utente indicato
pub fn as_user(request: TestRequest, user_id: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("authorization"),
        format!("Bearer {}", create_test_jwt(user_id, user_id, JWT_SECRET)),
    )
}

pub fn test_user(id: &str, role: UserRole, status: UserStatus) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        avatar: avatar_for(id),
        role,
        country: "IR".to_string(),
        status,
    }
}

/// Stato di partenza: utente locale admin più gli utenti indicati
pub fn seeded_with(users: Vec<User>) -> AppData {
    let mut data = AppData::seeded();
    for user in users {
        data.users.insert(user.id.clone(), user);
    }
    data
}
