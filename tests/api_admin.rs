//! Integration tests per il pannello admin
//!
//! Test per:
//! - PUT /admin/users/{id}/role
//! - POST /admin/settings
//! - POST /admin/password/change
//! - POST /admin/password/remove

mod common;

#[cfg(test)]
mod admin_tests {
    use super::common::*;
    use axum_test::http::StatusCode;
    use qamar_server::core::verify_password;
    use qamar_server::entities::{LOCAL_USER_ID, UserRole, UserStatus};
    use qamar_server::repositories::AppData;
    use serde_json::{Value, json};

    // ============================================================
    // Test per PUT /admin/users/{id}/role - update_user_role
    // ============================================================

    #[tokio::test]
    async fn test_promote_user_to_admin() {
        let data = seeded_with(vec![test_user("u1", UserRole::User, UserStatus::Active)]);
        let server = create_test_server(create_test_state(data));

        let response = as_user(server.put("/admin/users/u1/role"), LOCAL_USER_ID)
            .json(&json!({ "role": "admin" }))
            .await;

        response.assert_status_ok();
        let users: Value = response.json();
        assert_eq!(users["u1"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_cannot_demote_last_admin() {
        let server = create_test_server(create_test_state(AppData::seeded()));

        let response = as_user(
            server.put(&format!("/admin/users/{}/role", LOCAL_USER_ID)),
            LOCAL_USER_ID,
        )
        .json(&json!({ "role": "user" }))
        .await;

        response.assert_status_conflict();
    }

    #[tokio::test]
    async fn test_demote_admin_when_another_exists() {
        let data = seeded_with(vec![test_user("u1", UserRole::Admin, UserStatus::Active)]);
        let server = create_test_server(create_test_state(data));

        let response = as_user(server.put("/admin/users/u1/role"), LOCAL_USER_ID)
            .json(&json!({ "role": "user" }))
            .await;

        response.assert_status_ok();
        let users: Value = response.json();
        assert_eq!(users["u1"]["role"], "user");
    }

    #[tokio::test]
    async fn test_role_of_pending_user_is_refused() {
        let data = seeded_with(vec![test_user("p1", UserRole::User, UserStatus::Pending)]);
        let state = create_test_state(data);
        let server = create_test_server(state.clone());

        let response = as_user(server.put("/admin/users/p1/role"), LOCAL_USER_ID)
            .json(&json!({ "role": "admin" }))
            .await;

        response.assert_status_conflict();
        let snapshot = state.store.snapshot().await;
        assert_eq!(snapshot.user("p1").unwrap().role, UserRole::User);
    }

    #[tokio::test]
    async fn test_pending_admin_does_not_cover_last_active_admin() {
        // un admin ancora in attesa non può aprire sessioni: non conta
        let data = seeded_with(vec![test_user("p1", UserRole::Admin, UserStatus::Pending)]);
        let server = create_test_server(create_test_state(data));

        as_user(
            server.put(&format!("/admin/users/{}/role", LOCAL_USER_ID)),
            LOCAL_USER_ID,
        )
        .json(&json!({ "role": "user" }))
        .await
        .assert_status_conflict();

        // l'admin locale conserva l'accesso al pannello
        as_user(server.get("/admin/requests"), LOCAL_USER_ID)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_role_of_unknown_user() {
        let server = create_test_server(create_test_state(AppData::seeded()));

        let response = as_user(server.put("/admin/users/ghost/role"), LOCAL_USER_ID)
            .json(&json!({ "role": "admin" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_non_admin_cannot_change_roles() {
        let data = seeded_with(vec![test_user("u1", UserRole::User, UserStatus::Active)]);
        let server = create_test_server(create_test_state(data));

        let response = as_user(server.put("/admin/users/u1/role"), "u1")
            .json(&json!({ "role": "admin" }))
            .await;

        response.assert_status_forbidden();
    }

    // ============================================================
    // Test per POST /admin/settings - save_admin_settings
    // ============================================================

    #[tokio::test]
    async fn test_forcing_local_network_enables_it() {
        let state = create_test_state(AppData::seeded());
        let server = create_test_server(state.clone());

        let response = as_user(server.post("/admin/settings"), LOCAL_USER_ID)
            .json(&json!({
                "forceLocalNetwork": true,
                "adsenseClientId": " ca-pub-123 ",
                "requireProfileSetup": false,
                "requireApprovalForNewUsers": true
            }))
            .await;

        response.assert_status_ok();
        let settings: Value = response.json();
        assert_eq!(settings["adsenseClientId"], "ca-pub-123");
        assert!(state.store.snapshot().await.is_local_network);
    }

    // ============================================================
    // Test per /admin/password
    // ============================================================

    #[tokio::test]
    async fn test_set_change_and_remove_password() {
        let state = create_test_state(AppData::seeded());
        let server = create_test_server(state.clone());

        // prima impostazione: nessuna password corrente richiesta
        as_user(server.post("/admin/password/change"), LOCAL_USER_ID)
            .json(&json!({ "newPassword": "first" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        // cambio con password corrente errata
        as_user(server.post("/admin/password/change"), LOCAL_USER_ID)
            .json(&json!({ "currentPassword": "wrong", "newPassword": "second" }))
            .await
            .assert_status_unauthorized();

        as_user(server.post("/admin/password/change"), LOCAL_USER_ID)
            .json(&json!({ "currentPassword": "first", "newPassword": "second" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let hash = state.store.snapshot().await.admin_password_hash.unwrap();
        assert!(verify_password("second", &hash));

        as_user(server.post("/admin/password/remove"), LOCAL_USER_ID)
            .json(&json!({ "currentPassword": "second" }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert!(state.store.snapshot().await.admin_password_hash.is_none());
    }

    #[tokio::test]
    async fn test_password_too_short() {
        let server = create_test_server(create_test_state(AppData::seeded()));

        let response = as_user(server.post("/admin/password/change"), LOCAL_USER_ID)
            .json(&json!({ "newPassword": "ab" }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_remove_password_when_none_set() {
        let server = create_test_server(create_test_state(AppData::seeded()));

        let response = as_user(server.post("/admin/password/remove"), LOCAL_USER_ID)
            .json(&json!({ "currentPassword": "whatever" }))
            .await;

        response.assert_status_not_found();
    }
}
