//! HTTP 服务器模块
//!
//! 为地图看板提供 REST API：查询巡逻网络，计算三种路线算法

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::metrics;
use crate::planner::RoutePlanner;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use crate::config::ServerConfig;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 加载的巡逻网络，只读共享
    pub graph: Arc<Graph>,
    pub planner: RoutePlanner,
}

impl AppState {
    pub fn new(graph: Graph, planner: RoutePlanner) -> Self {
        Self {
            graph: Arc::new(graph),
            planner,
        }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标和统计
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 巡逻网络
        .route("/graph", get(get_graph))
        // 图算法
        .route("/algorithm/mst", post(spanning_tree))
        .route("/algorithm/max-flow", post(max_flow))
        .route("/algorithm/shortest-paths", post(shortest_paths))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 启动服务器
pub async fn start_server(config: ServerConfig, state: AppState) -> Result<()> {
    let app = router(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("绑定地址失败: {}", e)))?;
    info!("PatrolGraph 服务器启动于 http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::ServerError(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    let prom = metrics::global_metrics().to_prometheus();

    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        Body::from(prom.content),
    )
        .into_response()
}

/// 指标快照
async fn stats_handler() -> impl IntoResponse {
    Json(ApiResponse::success(metrics::global_metrics().snapshot()))
}

/// 当前巡逻网络
async fn get_graph(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.graph.as_ref().clone()))
}

/// 可选地携带自定义图的请求
#[derive(Debug, Default, Deserialize)]
pub struct GraphRequest {
    #[serde(default)]
    pub graph: Option<Graph>,
}

/// 最大流请求
#[derive(Debug, Deserialize)]
pub struct MaxFlowRequest {
    pub source: String,
    pub sink: String,
    #[serde(default)]
    pub graph: Option<Graph>,
}

/// 最短路径请求
#[derive(Debug, Deserialize)]
pub struct ShortestPathRequest {
    pub source: String,
    #[serde(default)]
    pub graph: Option<Graph>,
}

/// 请求中的图优先，需先通过校验；否则使用已加载的网络
fn resolve_graph(state: &AppState, custom: Option<Graph>) -> Result<Arc<Graph>> {
    match custom {
        Some(graph) => {
            if let Err(e) = graph.validate() {
                state.planner.record_failure();
                return Err(e);
            }
            Ok(Arc::new(graph))
        }
        None => Ok(state.graph.clone()),
    }
}

/// 请求体可以为空；非空时必须是合法的 `GraphRequest`
fn parse_graph_request(state: &AppState, body: &[u8]) -> Result<GraphRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GraphRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        state.planner.record_failure();
        Error::ParseError(format!("请求体格式错误: {}", e))
    })
}

/// 最小生成树
async fn spanning_tree(State(state): State<AppState>, body: Bytes) -> Response {
    let result = parse_graph_request(&state, &body)
        .and_then(|req| resolve_graph(&state, req.graph))
        .map(|graph| state.planner.spanning_tree(&graph));
    match result {
        Ok(report) => ok(report),
        Err(e) => failure(e),
    }
}

/// 最大流
async fn max_flow(State(state): State<AppState>, Json(req): Json<MaxFlowRequest>) -> Response {
    let result = resolve_graph(&state, req.graph)
        .and_then(|graph| state.planner.max_flow(&graph, &req.source, &req.sink));
    match result {
        Ok(report) => ok(report),
        Err(e) => failure(e),
    }
}

/// 单源最短路径
async fn shortest_paths(
    State(state): State<AppState>,
    Json(req): Json<ShortestPathRequest>,
) -> Response {
    let result = resolve_graph(&state, req.graph)
        .and_then(|graph| state.planner.shortest_paths(&graph, &req.source));
    match result {
        Ok(report) => ok(report),
        Err(e) => failure(e),
    }
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

fn failure(error: Error) -> Response {
    let status = match error {
        Error::UnknownStation(_) => StatusCode::NOT_FOUND,
        Error::DuplicateStation(_)
        | Error::InvalidRoute(_)
        | Error::UnknownAlgorithm(_)
        | Error::ParseError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::<()>::error(&error.to_string()))).into_response()
}

/// API 响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
