//! PatrolGraph 服务器入口
//!
//! 启动 HTTP API 服务器

use anyhow::Context;
use clap::Parser;
use patrolgraph::config::AppConfig;
use patrolgraph::import::PatrolNetwork;
use patrolgraph::logging::init_tracing;
use patrolgraph::planner::RoutePlanner;
use patrolgraph::server::{start_server, AppState};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "patrolgraph-server")]
#[command(about = "PatrolGraph HTTP API 服务器")]
struct Args {
    /// 配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 巡逻网络 JSON 文件，覆盖配置中的数据集
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// 监听地址
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 巡逻速度（公里/小时）
    #[arg(long)]
    speed: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(speed) = args.speed {
        config.analysis.patrol_speed_kmh = speed;
    }
    config.validate()?;

    init_tracing(&config.log_filter);

    let network = match &args.data {
        Some(path) => PatrolNetwork::load_json(path)
            .with_context(|| format!("无法加载巡逻网络 {}", path.display()))?,
        None => config.load_network().context("无法加载巡逻网络")?,
    };
    let graph = network.to_graph()?;
    info!(
        stations = graph.node_count(),
        routes = graph.edge_count(),
        "巡逻网络已加载"
    );

    let state = AppState::new(graph, RoutePlanner::new(config.analysis.clone()));
    start_server(config.server, state).await?;

    Ok(())
}
