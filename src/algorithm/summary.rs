//! 巡逻路线统计
//!
//! 汇总算法结果的总距离、覆盖站点数和预计巡逻时长

use super::max_flow::MaxFlow;
use super::shortest_path::ShortestPaths;
use crate::graph::{Edge, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 林区巡逻平均速度（公里/小时）
pub const DEFAULT_PATROL_SPEED_KMH: f64 = 15.0;

/// 路线统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_distance_km: f64,
    pub stations_covered: usize,
    pub total_stations: usize,
    pub estimated_minutes: u64,
    pub estimated_time: String,
}

impl RouteSummary {
    fn new(
        total_distance_km: f64,
        stations_covered: usize,
        total_stations: usize,
        speed_kmh: f64,
    ) -> Self {
        let estimated_minutes = estimate_minutes(total_distance_km, speed_kmh);
        Self {
            total_distance_km,
            stations_covered,
            total_stations,
            estimated_minutes,
            estimated_time: format_patrol_time(estimated_minutes),
        }
    }

    /// 生成树：边距离之和，覆盖站点为边端点
    pub fn for_spanning_tree(graph: &Graph, edges: &[Edge], speed_kmh: f64) -> Self {
        let total = edges.iter().map(|e| e.weight).sum();
        let covered: HashSet<&NodeId> = edges
            .iter()
            .flat_map(|e| [&e.source, &e.target])
            .collect();
        Self::new(total, covered.len(), graph.node_count(), speed_kmh)
    }

    /// 最大流：各增广路径距离之和
    pub fn for_max_flow(graph: &Graph, result: &MaxFlow, speed_kmh: f64) -> Self {
        let total = result.paths.iter().map(|p| p.distance).sum();
        Self::new(total, result.stations_covered, graph.node_count(), speed_kmh)
    }

    /// 最短路径：只累加可达站点的距离
    pub fn for_shortest_paths(graph: &Graph, result: &ShortestPaths, speed_kmh: f64) -> Self {
        let reachable: Vec<f64> = result
            .distances
            .values()
            .copied()
            .filter(|d| d.is_finite())
            .collect();
        Self::new(
            reachable.iter().sum(),
            reachable.len(),
            graph.node_count(),
            speed_kmh,
        )
    }
}

/// 按速度估算巡逻分钟数（四舍五入）
pub fn estimate_minutes(distance_km: f64, speed_kmh: f64) -> u64 {
    let valid = |value: f64| value.is_finite() && value > 0.0;
    if !valid(distance_km) || !valid(speed_kmh) {
        return 0;
    }
    (distance_km / speed_kmh * 60.0).round() as u64
}

/// 格式化巡逻时长，例如 `2 hours 5 min`、`45 min`、`< 1 min`
pub fn format_patrol_time(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours > 1 { "s" } else { "" }));
    }
    if rest > 0 {
        parts.push(format!("{} min", rest));
    }

    if parts.is_empty() {
        "< 1 min".to_string()
    } else {
        parts.join(" ")
    }
}
