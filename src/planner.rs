//! 路线规划
//!
//! 展示层（HTTP 接口、命令行）调用算法的统一入口：
//! 校验站点、运行算法、记录指标并生成路线统计。

use crate::algorithm::{
    minimum_spanning_tree, shortest_paths, Algorithm, EdmondsKarp, MaxFlow, RouteSummary,
    ShortestPaths,
};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeId};
use crate::metrics::{global_metrics, Metrics};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// 最小生成树报告
#[derive(Debug, Clone, Serialize)]
pub struct SpanningTreeReport {
    pub edges: Vec<Edge>,
    pub summary: RouteSummary,
}

/// 最大流报告
#[derive(Debug, Clone, Serialize)]
pub struct MaxFlowReport {
    pub result: MaxFlow,
    pub summary: RouteSummary,
}

/// 最短路径报告
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathReport {
    pub result: ShortestPaths,
    /// 每个可达站点的完整路径
    pub routes: IndexMap<NodeId, Vec<NodeId>>,
    pub summary: RouteSummary,
}

/// 路线规划器
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    analysis: AnalysisConfig,
    metrics: Arc<Metrics>,
}

impl RoutePlanner {
    /// 使用全局指标
    pub fn new(analysis: AnalysisConfig) -> Self {
        Self::with_metrics(analysis, global_metrics())
    }

    pub fn with_metrics(analysis: AnalysisConfig, metrics: Arc<Metrics>) -> Self {
        Self { analysis, metrics }
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// 计算最小生成树
    pub fn spanning_tree(&self, graph: &Graph) -> SpanningTreeReport {
        let timer = self.metrics.start_timer();
        let edges = minimum_spanning_tree(graph);
        self.metrics.record_run(Algorithm::Mst, timer);

        let summary =
            RouteSummary::for_spanning_tree(graph, &edges, self.analysis.patrol_speed_kmh);
        info!(
            edges = edges.len(),
            distance_km = summary.total_distance_km,
            "最小生成树计算完成"
        );

        SpanningTreeReport { edges, summary }
    }

    /// 计算最大流，源点和汇点必须是图中的站点
    pub fn max_flow(&self, graph: &Graph, source: &str, sink: &str) -> Result<MaxFlowReport> {
        self.require_station(graph, source)?;
        self.require_station(graph, sink)?;

        let timer = self.metrics.start_timer();
        let result = EdmondsKarp::new(graph)
            .with_max_augmentations(self.analysis.max_augmentations)
            .max_flow(source, sink);
        self.metrics.record_run(Algorithm::MaxFlow, timer);
        self.metrics.record_augmenting_paths(result.paths.len());

        let summary = RouteSummary::for_max_flow(graph, &result, self.analysis.patrol_speed_kmh);
        info!(
            source,
            sink,
            max_flow = result.max_flow,
            paths = result.paths.len(),
            "最大流计算完成"
        );

        Ok(MaxFlowReport { result, summary })
    }

    /// 计算单源最短路径，起点必须是图中的站点
    pub fn shortest_paths(&self, graph: &Graph, source: &str) -> Result<ShortestPathReport> {
        self.require_station(graph, source)?;

        let timer = self.metrics.start_timer();
        let result = shortest_paths(graph, source);
        self.metrics.record_run(Algorithm::ShortestPaths, timer);
        if result.negative_cycle {
            self.metrics.record_negative_cycle();
        }

        let routes = result.routes();
        let summary =
            RouteSummary::for_shortest_paths(graph, &result, self.analysis.patrol_speed_kmh);
        info!(
            source,
            reachable = summary.stations_covered,
            "最短路径计算完成"
        );

        Ok(ShortestPathReport {
            result,
            routes,
            summary,
        })
    }

    /// 记录一次被拒绝的请求
    pub fn record_failure(&self) {
        self.metrics.record_failure();
    }

    fn require_station(&self, graph: &Graph, id: &str) -> Result<()> {
        if graph.contains_node(id) {
            Ok(())
        } else {
            self.record_failure();
            Err(Error::UnknownStation(id.to_string()))
        }
    }
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
