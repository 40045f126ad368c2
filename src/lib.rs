//! PatrolGraph - 护林巡逻路线规划
//!
//! 把护林站和巡逻路线建模为带权无向图，提供：
//! - 最小生成树：连通全部站点的最短路网
//! - 最大流：两站之间可同时调度的巡逻力量
//! - 单源最短路径：从指定站点出发的最短巡逻路线
//! - HTTP API 与交互式命令行

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod logging;
pub mod metrics;
pub mod planner;
pub mod server;

// 重导出常用类型
pub use algorithm::{
    max_flow, minimum_spanning_tree, shortest_paths, Algorithm, EdmondsKarp, MaxFlow,
    RouteSummary, ShortestPaths,
};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node, NodeId};
pub use import::PatrolNetwork;
pub use planner::RoutePlanner;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
