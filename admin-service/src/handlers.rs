//! Handler模块

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::errors::AppError;
use common::models::{AgentConfig, Sample};
use common::response::ApiResponse;

use crate::state::AppState;
use crate::view;

/// 编辑表单提交内容
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateConfigForm {
    /// 系统指令
    pub instructions: String,
    /// JSON 编码的样例数组
    #[serde(default = "default_samples")]
    pub samples: String,
}

fn default_samples() -> String {
    "[]".to_string()
}

impl UpdateConfigForm {
    /// Parses the form into a configuration.
    fn into_config(self) -> Result<AgentConfig, AppError> {
        let samples: Vec<Sample> = serde_json::from_str(&self.samples).map_err(|e| {
            AppError::Validation(format!("samples must be a JSON array of {{question, sql}}: {e}"))
        })?;
        Ok(AgentConfig::new(self.instructions, samples))
    }
}

/// 渲染配置编辑页面
#[utoipa::path(
    get,
    path = "/",
    tag = "admin",
    responses(
        (status = 200, description = "配置编辑页面", body = String, content_type = "text/html"),
        (status = 500, description = "配置文件缺失或无效")
    )
)]
pub async fn view_config(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let config = state.store.load().await?;
    Ok(Html(view::render_page(&config)))
}

/// 提交表单，覆盖配置文件后重定向回编辑页面
#[utoipa::path(
    post,
    path = "/update",
    tag = "admin",
    request_body(content = UpdateConfigForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "已保存，重定向到编辑页面"),
        (status = 400, description = "表单缺少字段或 samples 不是合法的 JSON 数组")
    )
)]
pub async fn update_config(
    State(state): State<AppState>,
    form: Result<Form<UpdateConfigForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let config = form.into_config()?;
    state.store.save(&config).await?;
    tracing::info!(samples = config.samples.len(), "配置已通过表单更新");
    Ok(Redirect::to("/"))
}

/// 获取当前配置
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "config",
    responses(
        (status = 200, description = "当前配置", body = ApiResponse<AgentConfig>),
        (status = 500, description = "配置文件缺失或无效")
    )
)]
pub async fn get_config(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AgentConfig>>, AppError> {
    let config = state.store.load().await?;
    Ok(Json(ApiResponse::ok_with_service(config, state.config.service_name.clone())))
}

/// 整体替换配置
#[utoipa::path(
    put,
    path = "/api/config",
    tag = "config",
    request_body = AgentConfig,
    responses(
        (status = 200, description = "配置已保存", body = ApiResponse<AgentConfig>),
        (status = 400, description = "请求体不是合法的配置 JSON")
    )
)]
pub async fn replace_config(
    State(state): State<AppState>,
    payload: Result<Json<AgentConfig>, JsonRejection>,
) -> Result<Json<ApiResponse<AgentConfig>>, AppError> {
    let Json(config) = payload?;
    state.store.save(&config).await?;
    tracing::info!(samples = config.samples.len(), "配置已通过 API 更新");
    Ok(Json(ApiResponse::ok_with_service(config, state.config.service_name.clone())))
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
