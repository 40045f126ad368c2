//! 图算法模块
//!
//! 包含最小生成树、最大流和单源最短路径三种算法，
//! 均为输入图的纯函数，调用之间不保留任何状态。

mod max_flow;
mod mst;
mod shortest_path;
mod summary;

pub use max_flow::{
    build_residual_graph, max_flow, path_distance, EdmondsKarp, FlowPath, MaxFlow, ResidualGraph,
    DEFAULT_MAX_AUGMENTATIONS,
};
pub use mst::{minimum_spanning_tree, DisjointSet};
pub use shortest_path::{reconstruct_path, shortest_paths, PathTrace, ShortestPaths};
pub use summary::{estimate_minutes, format_patrol_time, RouteSummary, DEFAULT_PATROL_SPEED_KMH};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 可选的路线算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// 最小生成树
    Mst,
    /// 最大流
    #[serde(rename = "maxflow")]
    MaxFlow,
    /// 单源最短路径
    #[serde(rename = "shortestpath")]
    ShortestPaths,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Mst, Algorithm::MaxFlow, Algorithm::ShortestPaths];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Mst => "mst",
            Algorithm::MaxFlow => "maxflow",
            Algorithm::ShortestPaths => "shortestpath",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mst" | "spanning-tree" => Ok(Algorithm::Mst),
            "maxflow" | "max-flow" | "flow" => Ok(Algorithm::MaxFlow),
            "shortestpath" | "shortest-path" | "shortest-paths" | "paths" => {
                Ok(Algorithm::ShortestPaths)
            }
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}
