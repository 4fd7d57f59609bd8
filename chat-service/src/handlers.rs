//! Handler模块

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::errors::AppError;
use common::middleware::RequestId;
use common::models::{ChatMessageRequest, ChatReply};
use common::response::ApiResponse;

use crate::state::AppState;
use crate::SERVICE_NAME;

/// 开始会话，返回问候语
#[utoipa::path(
    post,
    path = "/api/chat/start",
    tag = "chat",
    responses(
        (status = 200, description = "问候消息", body = ApiResponse<ChatReply>),
        (status = 500, description = "配置文件缺失或无效")
    )
)]
pub async fn start_chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let reply = state.chat.on_start().await?;
    Ok(Json(
        ApiResponse::ok_with_service(reply, SERVICE_NAME).with_request_id(request_id.as_str()),
    ))
}

/// 处理一条用户消息
#[utoipa::path(
    post,
    path = "/api/chat/message",
    tag = "chat",
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "表格或文本回复", body = ApiResponse<ChatReply>),
        (status = 400, description = "请求体不是合法的消息 JSON"),
        (status = 422, description = "SQL 执行失败"),
        (status = 502, description = "数据库或补全服务不可达"),
        (status = 503, description = "没有可用的数据库驱动")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let Json(req) = payload?;
    let reply = state.chat.on_message(&req.content).await?;
    Ok(Json(
        ApiResponse::ok_with_service(reply, SERVICE_NAME).with_request_id(request_id.as_str()),
    ))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use common::config::AppConfig;

    use crate::service::tests::{customers_config, fixture};
    use crate::state::AppState;

    async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, Value, Option<String>) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap(), request_id)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-request-id", "req-42")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app(service: crate::service::ChatService) -> axum::Router {
        let config = AppConfig::load_with_service(crate::SERVICE_NAME, crate::DEFAULT_PORT);
        crate::create_router(AppState::with_service(config, service))
    }

    #[tokio::test]
    async fn test_message_renders_table() {
        let fx = fixture(Some(customers_config())).await;
        let (status, body, request_id) = send(
            app(fx.service.clone()),
            post_json("/api/chat/message", json!({"content": "Who are our top customers?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(request_id.as_deref(), Some("req-42"));
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["request_id"], "req-42");
        assert_eq!(body["data"]["type"], "table");
        assert_eq!(body["data"]["columns"], json!(["id", "name"]));
        assert_eq!(body["data"]["rows"][0], json!([1, "Acme"]));
    }

    #[tokio::test]
    async fn test_message_renders_completion_text() {
        let fx = fixture(Some(customers_config())).await;
        let (status, body, _) = send(
            app(fx.service.clone()),
            post_json("/api/chat/message", json!({"content": "What's the weather?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"type": "text", "content": "echo: What's the weather?"}));
    }

    #[tokio::test]
    async fn test_failures_render_as_failure_notice() {
        let fx = fixture(None).await;
        let (status, body, _) = send(
            app(fx.service.clone()),
            post_json("/api/chat/message", json!({"content": "hello"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_body_renders_validation_envelope() {
        let fx = fixture(Some(customers_config())).await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat/message")
            .header("content-type", "application/json")
            .body(Body::from("{\"content\": "))
            .unwrap();

        let (status, body, _) = send(app(fx.service.clone()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(fx.completion.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_field_renders_validation_envelope() {
        let fx = fixture(Some(customers_config())).await;
        let (status, body, _) = send(
            app(fx.service.clone()),
            post_json("/api/chat/message", json!({"text": "hello"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_start_returns_greeting() {
        let fx = fixture(Some(customers_config())).await;
        let (status, body, _) =
            send(app(fx.service.clone()), post_json("/api/chat/start", json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"type": "text", "content": "Be concise."}));
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let fx = fixture(None).await;
        let router = app(fx.service.clone());

        let (status, body, request_id) = send(
            router.clone(),
            Request::builder().uri("/api/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "chat-service");
        assert!(request_id.is_some());

        let (status, body, _) = send(
            router,
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/chat/message"].is_object());
    }
}
