/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → dependencies → Router
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::v0::handlers::fallback::not_found;
use crate::{api, config::Config, middleware, services::auth, state::AppState};

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,corald=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting corald in {:?} mode on {}, identity provider {}",
        config.app_env,
        config.addr,
        config.auth0_domain
    );

    let validator = auth::build_token_validator(&config)?;
    let state = AppState::new(validator);

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::v0::routes(state.clone()))
        .fallback(not_found)
        .with_state(state);

    middleware::http::apply(router, config)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> Config {
        let domain = server.uri();
        Config::from_lookup(|key| match key {
            "CORALD_AUTH0_DOMAIN" => Some(domain.clone()),
            "CORALD_AUTH0_TIMEOUT_SECONDS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn app_for(server: &MockServer) -> Router {
        let config = config_for(server);
        let validator = auth::build_token_validator(&config).unwrap();
        build_router(AppState::new(validator), &config)
    }

    async fn mount_userinfo(server: &MockServer, token: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(query_param("access_token", token))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn session_request(token: &str) -> Request<Body> {
        Request::builder()
            .uri("/v0/session")
            .header("X-Mycoral-Accesstoken", token)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn good_token_reaches_session_handler() {
        let server = MockServer::start().await;
        mount_userinfo(
            &server,
            "good-token",
            ResponseTemplate::new(200).set_body_json(json!({
                "sub": "auth0|123",
                "name": "Jane Doe",
                "email": "jane@example.com",
                "email_verified": true,
                "app_metadata": {"admin": true}
            })),
        )
        .await;

        let resp = app_for(&server)
            .oneshot(session_request("good-token"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(body["sub"], "auth0|123");
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(body["email_verified"], true);
        assert_eq!(body["admin"], true);
    }

    #[tokio::test]
    async fn bad_token_gets_401_without_detail() {
        let server = MockServer::start().await;
        mount_userinfo(
            &server,
            "bad-token",
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_token"})),
        )
        .await;

        let resp = app_for(&server)
            .oneshot(session_request("bad-token"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = String::from_utf8(body_bytes(resp).await).unwrap();
        assert!(!body.contains("bad-token"));
        assert!(!body.contains("invalid_token"));
    }

    #[tokio::test]
    async fn provider_outage_gets_500_without_detail() {
        let server = MockServer::start().await;
        mount_userinfo(
            &server,
            "tok",
            ResponseTemplate::new(502).set_body_string("upstream exploded"),
        )
        .await;

        let resp = app_for(&server)
            .oneshot(session_request("tok"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = String::from_utf8(body_bytes(resp).await).unwrap();
        assert!(!body.contains("502"));
        assert!(!body.contains("exploded"));
    }

    #[tokio::test]
    async fn malformed_userinfo_gets_500() {
        let server = MockServer::start().await;
        mount_userinfo(
            &server,
            "tok",
            ResponseTemplate::new(200).set_body_string("{\"sub\": 42"),
        )
        .await;

        let resp = app_for(&server)
            .oneshot(session_request("tok"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_is_not_gated() {
        let server = MockServer::start().await;

        let resp = app_for(&server)
            .oneshot(Request::builder().uri("/v0/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bare_prefix_redirects_with_301() {
        let server = MockServer::start().await;

        let resp = app_for(&server)
            .oneshot(Request::builder().uri("/v0?x=1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "/v0/?x=1");
    }

    #[tokio::test]
    async fn unknown_route_is_404_and_never_hits_provider() {
        let server = MockServer::start().await;

        let resp = app_for(&server)
            .oneshot(
                Request::builder()
                    .uri("/v0/ipfs/cat/abc")
                    .header("X-Mycoral-Accesstoken", "tok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(resp).await, b"Not Found");
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
