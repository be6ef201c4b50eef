/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;
mod tests;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use core::types::ServerState;
use std::io;
use std::sync::Arc;

pub async fn serve_web(state: Arc<ServerState>) -> io::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip.clone(), state.cli.port.clone());

    let cors_origin = state
        .cli
        .serve_url
        .clone()
        .try_into()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid serve url"))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(cors_origin))
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(vec![AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true);

    let app = Router::new()
        .route(
            "/api/customer",
            get(endpoints::customers::get).put(endpoints::customers::put),
        )
        .route(
            "/api/customer/{customer}",
            get(endpoints::customers::get_customer_detail),
        )
        .route(
            "/api/customer/{customer}/sites",
            get(endpoints::customers::get_customer_sites),
        )
        .route(
            "/api/site",
            get(endpoints::sites::get).put(endpoints::sites::put),
        )
        .route("/api/site/deleted", get(endpoints::sites::get_deleted))
        .route(
            "/api/site/{site}",
            get(endpoints::sites::get_site_detail)
                .patch(endpoints::sites::patch_site)
                .delete(endpoints::sites::delete_site),
        )
        .route(
            "/api/site/{site}/restore",
            post(endpoints::sites::post_restore_site),
        )
        .route("/api/site/{site}/entry", post(endpoints::entries::post_entry))
        .route(
            "/api/site/{site}/share",
            post(endpoints::shares::post_share_site),
        )
        .route(
            "/api/site/{site}/share/day",
            post(endpoints::shares::post_share_day),
        )
        .route("/api/map", get(endpoints::sites::get_map))
        .route("/api/file/{file}", get(endpoints::entries::get_file))
        .route(
            "/api/file/{file}/comment",
            patch(endpoints::entries::patch_file_comment),
        )
        .route(
            "/api/share/{share}/revoke",
            post(endpoints::shares::post_revoke_share),
        )
        .route("/api/backup/download", get(endpoints::backup::get_download))
        .route("/api/backup/remote", post(endpoints::backup::post_remote))
        .route("/api/user", get(endpoints::user::get))
        .route(
            "/api/user/api",
            get(endpoints::user::get_keys)
                .post(endpoints::user::post_keys)
                .delete(endpoints::user::delete_keys),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ))
        .route("/api/user/login", post(endpoints::auth::post_login))
        .route("/api/user/logout", post(endpoints::auth::post_logout))
        .route("/api/user/register", post(endpoints::auth::post_register))
        .route("/api/health", get(endpoints::get_health))
        .route(
            "/api/share/site/{site}",
            get(endpoints::shares::get_public_site),
        )
        .route(
            "/api/share/site/{site}/day/{date}",
            get(endpoints::shares::get_public_day),
        )
        .route(
            "/api/share/file/{file}",
            get(endpoints::shares::get_public_file),
        )
        .fallback(endpoints::handle_404)
        .layer(DefaultBodyLimit::max(state.cli.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    axum::serve(listener, app).await
}
