/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#[cfg(test)]
mod tests {
    use crate::error::WebError;
    use axum::http::StatusCode;
    use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
    use axum::response::IntoResponse;
    use core::storage::FileStore;
    use core::types::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use tower_http::cors::{AllowOrigin, CorsLayer};

    fn create_mock_cli() -> Cli {
        Cli {
            log_level: "info".to_string(),
            ip: "127.0.0.1".to_string(),
            port: 3000,
            serve_url: "http://127.0.0.1:3000".to_string(),
            data_dir: std::env::temp_dir()
                .join("wellatlas-web-tests")
                .to_string_lossy()
                .to_string(),
            database_url: Some("mock://test".to_string()),
            database_url_file: None,
            jwt_secret_file: "test_jwt".to_string(),
            disable_registration: false,
            max_body_size: 104857600,
            backup_url: None,
            backup_folder: None,
            backup_secret_file: None,
        }
    }

    fn create_mock_state() -> Arc<ServerState> {
        let cli = create_mock_cli();
        let storage = FileStore::new(&cli.data_dir).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<MUser>::new()])
            .into_connection();

        Arc::new(ServerState { db, storage, cli })
    }

    #[test]
    fn test_server_state_configuration() {
        let state = create_mock_state();

        assert!(!state.cli.disable_registration);
        assert_eq!(state.cli.ip, "127.0.0.1");
        assert_eq!(state.cli.port, 3000);
        assert_eq!(state.cli.serve_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_cors_configuration() {
        let state = create_mock_state();

        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::exact(
                state.cli.serve_url.clone().try_into().unwrap(),
            ))
            .allow_headers(vec![AUTHORIZATION, ACCEPT, CONTENT_TYPE])
            .allow_credentials(true);

        let _ = cors;
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (WebError::not_found("Site"), StatusCode::NOT_FOUND),
            (WebError::already_exists("Customer"), StatusCode::CONFLICT),
            (WebError::invalid_credentials(), StatusCode::UNAUTHORIZED),
            (WebError::access_denied(), StatusCode::FORBIDDEN),
            (WebError::invalid_date(), StatusCode::BAD_REQUEST),
            (
                WebError::InternalServerError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_public_share_denials_are_uniform() {
        // NotFound and Forbidden on public paths must present identically
        let denied_unknown_site = WebError::access_denied().into_response();
        let denied_wrong_scope = WebError::access_denied().into_response();

        assert_eq!(denied_unknown_site.status(), denied_wrong_scope.status());
        assert_eq!(denied_unknown_site.status(), StatusCode::FORBIDDEN);
    }

    mod auth_tests {
        use crate::endpoints::auth::*;

        #[test]
        fn test_make_login_request_serialization() {
            let request = MakeLoginRequest {
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            };

            let json = serde_json::to_string(&request).unwrap();
            assert!(json.contains("test@example.com"));
            assert!(json.contains("password123"));
        }

        #[test]
        fn test_make_user_request_serialization() {
            let request = MakeUserRequest {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
            };

            let json = serde_json::to_string(&request).unwrap();
            assert!(json.contains("Test User"));
            assert!(json.contains("test@example.com"));
        }
    }

    mod share_tests {
        use crate::endpoints::shares::*;
        use uuid::Uuid;

        #[test]
        fn test_share_day_request_serialization() {
            let request = MakeShareDayRequest {
                date: "2024-01-05".to_string(),
            };

            let json = serde_json::to_string(&request).unwrap();
            assert!(json.contains("2024-01-05"));
        }

        #[test]
        fn test_share_link_response_serialization() {
            let id = Uuid::new_v4();
            let response = ShareLinkResponse {
                id,
                token: "token123".to_string(),
                url: "http://127.0.0.1:3000/share/site/abc?token=token123".to_string(),
            };

            let json = serde_json::to_string(&response).unwrap();
            assert!(json.contains(&id.to_string()));
            assert!(json.contains("token123"));
        }
    }

    mod site_tests {
        use crate::endpoints::sites::*;
        use uuid::Uuid;

        #[test]
        fn test_make_site_request_deserialization() {
            let customer = Uuid::new_v4();
            let json = format!(
                r#"{{"customer":"{}","name":"North Ranch Well 3","latitude":37.4,"longitude":-120.0}}"#,
                customer
            );

            let request: MakeSiteRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(request.customer, customer);
            assert_eq!(request.name, "North Ranch Well 3");
            assert_eq!(request.latitude, Some(37.4));
            assert!(request.job_number.is_none());
        }

        #[test]
        fn test_patch_site_request_allows_partial_updates() {
            let request: PatchSiteRequest = serde_json::from_str(r#"{"status":"active"}"#).unwrap();
            assert_eq!(request.status, Some("active".to_string()));
            assert!(request.name.is_none());
            assert!(request.latitude.is_none());
        }
    }
}
