use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tower::ServiceExt;
use tracing::info;
use xrate::core::{ConversionHandler, ExchangeRateTable};
use xrate::server::app_router;

mod test_utils {
    use super::*;

    pub fn default_router() -> axum::Router {
        app_router(ConversionHandler::new(Arc::new(ExchangeRateTable::default())))
    }

    pub async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }
}

#[test_log::test(tokio::test)]
async fn test_jpy_to_usd_success() {
    let (status, body) = test_utils::get_json(
        test_utils::default_router(),
        "/exchange?source=JPY&target=USD&amount=10000",
    )
    .await;

    info!(?body, "Received exchange response");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": "success", "amount": "88.5"}));
}

#[test_log::test(tokio::test)]
async fn test_usd_to_twd_with_thousands_separator() {
    let (status, body) = test_utils::get_json(
        test_utils::default_router(),
        "/exchange?source=USD&target=TWD&amount=1%2C000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": "success", "amount": "30,444"}));
}

#[test_log::test(tokio::test)]
async fn test_identity_conversion() {
    let (status, body) = test_utils::get_json(
        test_utils::default_router(),
        "/exchange?source=TWD&target=TWD&amount=100",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": "success", "amount": "100"}));
}

#[test_log::test(tokio::test)]
async fn test_error_responses() {
    let cases = [
        ("/exchange", "Missing query parameters"),
        ("/exchange?source=USD&target=TWD", "Missing query parameters"),
        (
            "/exchange?source=&target=TWD&amount=10",
            "Missing query parameters",
        ),
        (
            "/exchange?source=USD&target=EUR&amount=10",
            "Invalid currency code",
        ),
        (
            "/exchange?source=EUR&target=USD&amount=abc",
            "Invalid currency code",
        ),
        (
            "/exchange?source=USD&target=TWD&amount=abc",
            "Invalid amount format",
        ),
        (
            "/exchange?source=USD&target=TWD&amount=-5",
            "Negative amount",
        ),
    ];

    for (uri, message) in cases {
        let (status, body) = test_utils::get_json(test_utils::default_router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"msg": "error", "error": message}), "{uri}");
    }
}

#[test_log::test(tokio::test)]
async fn test_unknown_route_and_method() {
    let router = test_utils::default_router();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/convert").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/exchange?source=USD&target=TWD&amount=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test_log::test(tokio::test)]
async fn test_served_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let handler = ConversionHandler::new(Arc::new(ExchangeRateTable::default()));
    let server = tokio::spawn(xrate::server::serve_with_shutdown(
        listener,
        handler,
        async move {
            let _ = shutdown_rx.await;
        },
    ));

    let url = format!("http://{addr}/exchange?source=USD&target=JPY&amount=2,000.5");
    let response = reqwest::get(&url).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"msg": "success", "amount": "223,657.9"}));

    let url = format!("http://{addr}/exchange?source=USD&target=EUR&amount=10");
    let response = reqwest::get(&url).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"msg": "error", "error": "Invalid currency code"}));

    shutdown_tx.send(()).unwrap();
    let result = server.await.unwrap();
    assert!(result.is_ok(), "Server failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_command_with_config_rates() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = r#"
        rates:
          EUR:
            EUR: 1
            GBP: 0.85
          GBP:
            EUR: 1.17
            GBP: 1
    "#;
    fs::write(config_path, config_content).expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Convert {
            source: "EUR".to_string(),
            target: "GBP".to_string(),
            amount: "1,000".to_string(),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );

    // The configured table replaces the built-in one
    let result = xrate::run_command(
        xrate::AppCommand::Convert {
            source: "USD".to_string(),
            target: "TWD".to_string(),
            amount: "1".to_string(),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_rates_command() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), "server:\n  listen_addr: \"127.0.0.1:5000\"\n")
        .expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Rates,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rates command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_rates_fail_startup() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = r#"
        rates:
          USD:
            USD: 2
    "#;
    fs::write(config_file.path(), config_content).expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Serve { listen: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    let err = result.expect_err("Serve should refuse an invalid rate table");
    assert!(format!("{err:#}").contains("Identity rate for USD must be 1"));
}
