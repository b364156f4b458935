// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end relay tests: a webhook event flows through the real
//! OpenRouter and Z-API clients against wiremock servers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use saci_gateway::{router, GatewayState};
use saci_openrouter::OpenRouterClient;
use saci_relay::{load_system_prompt, Pipeline, PipelineConfig};
use saci_zapi::ZapiClient;

async fn gateway_for(openrouter: &MockServer, zapi: &MockServer) -> axum::Router {
    let config = saci_config::load_and_validate_str(&format!(
        r#"
        [openrouter]
        api_key = "test-key"
        base_url = "{}"

        [zapi]
        instance_id = "inst1"
        instance_token = "tok1"
        client_token = "ct1"
        base_url = "{}"
        "#,
        openrouter.uri(),
        zapi.uri()
    ))
    .expect("test config should validate");

    let completion = Arc::new(OpenRouterClient::new(&config.openrouter).unwrap());
    let delivery = Arc::new(ZapiClient::new(&config.zapi).unwrap());
    let system_prompt = load_system_prompt(
        &config.relay.system_prompt,
        config.relay.system_prompt_file.as_deref(),
    );

    let pipeline = Pipeline::new(
        completion,
        delivery,
        None,
        PipelineConfig {
            system_prompt,
            model: config.openrouter.model.clone(),
            max_tokens: config.openrouter.max_tokens,
            context_turns: config.relay.context_turns,
            max_threads: config.relay.max_threads,
            sentinel_empty: config.relay.sentinel_empty.clone(),
            sentinel_error: config.relay.sentinel_error.clone(),
        },
    );

    router(GatewayState {
        pipeline: Arc::new(pipeline),
        start_time: std::time::Instant::now(),
    })
}

async fn post_webhook(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn webhook_round_trip_delivers_the_model_reply() {
    let openrouter = MockServer::start().await;
    let zapi = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header_matcher("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gen-1",
            "choices": [
                { "message": { "role": "assistant", "content": "Olá!" } }
            ]
        })))
        .expect(1)
        .mount(&openrouter)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances/inst1/token/tok1/send-text"))
        .and(header_matcher("client-token", "ct1"))
        .and(body_json(json!({
            "phone": "5511999",
            "message": "Olá!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messageId": "m1"
        })))
        .expect(1)
        .mount(&zapi)
        .await;

    let app = gateway_for(&openrouter, &zapi).await;
    let (status, body) = post_webhook(
        app,
        json!({
            "phone": "5511999",
            "fromMe": false,
            "text": { "message": "Oi" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn completion_failure_delivers_the_error_sentinel() {
    let openrouter = MockServer::start().await;
    let zapi = MockServer::start().await;

    // Exactly one attempt, no retry.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "upstream exploded", "code": 500 }
        })))
        .expect(1)
        .mount(&openrouter)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances/inst1/token/tok1/send-text"))
        .and(body_json(json!({
            "phone": "5511999",
            "message": "[Erro ao consultar a IA]"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messageId": "m2"
        })))
        .expect(1)
        .mount(&zapi)
        .await;

    let app = gateway_for(&openrouter, &zapi).await;
    let (status, body) = post_webhook(
        app,
        json!({
            "phone": "5511999",
            "fromMe": false,
            "text": { "message": "Oi" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn replies_carry_earlier_turns_as_context() {
    let openrouter = MockServer::start().await;
    let zapi = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "resposta" } }
            ]
        })))
        .expect(2)
        .mount(&openrouter)
        .await;

    Mock::given(method("POST"))
        .and(path("/instances/inst1/token/tok1/send-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messageId": "m3"
        })))
        .expect(2)
        .mount(&zapi)
        .await;

    let app = gateway_for(&openrouter, &zapi).await;
    for text in ["primeira", "segunda"] {
        let (status, _) = post_webhook(
            app.clone(),
            json!({
                "phone": "5511999",
                "fromMe": false,
                "text": { "message": text }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // The second completion request must include the first exchange.
    let requests = openrouter.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = second["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["content"], "primeira");
    assert_eq!(messages[2]["content"], "resposta");
    assert_eq!(messages[3]["content"], "segunda");
}
