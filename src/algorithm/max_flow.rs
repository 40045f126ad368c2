//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）
//! 用于估算两个站点之间可同时调度的巡逻力量

use crate::graph::{Graph, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// 默认增广次数上限
pub const DEFAULT_MAX_AUGMENTATIONS: usize = 10_000;

/// 残量图：站点 -> (邻居 -> 剩余容量)
///
/// 使用 IndexMap 保证邻居按插入顺序遍历，BFS 结果可复现。
pub type ResidualGraph = IndexMap<NodeId, IndexMap<NodeId, f64>>;

/// 一条增广路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPath {
    /// 源点到汇点的站点序列
    pub route: Vec<NodeId>,
    /// 本次增广推送的流量
    pub flow: f64,
    /// 路径总距离（按原始边距离计算）
    pub distance: f64,
}

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlow {
    /// 最大流量值
    pub max_flow: f64,
    /// 按发现顺序排列的增广路径
    pub paths: Vec<FlowPath>,
    /// 增广路径经过的不同站点数
    pub stations_covered: usize,
}

impl MaxFlow {
    fn empty() -> Self {
        Self {
            max_flow: 0.0,
            paths: Vec::new(),
            stations_covered: 0,
        }
    }
}

/// 构建残量图
///
/// 每条边 (u, v) 设置正向容量 `residual[u][v]`（缺省为距离），
/// 并在反向弧不存在时补一个 0 容量的 `residual[v][u]`。
pub fn build_residual_graph(graph: &Graph) -> ResidualGraph {
    let mut residual: ResidualGraph = graph
        .nodes()
        .iter()
        .map(|node| (node.id.clone(), IndexMap::new()))
        .collect();

    for edge in graph.edges() {
        residual
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone(), edge.effective_capacity());
        residual
            .entry(edge.target.clone())
            .or_default()
            .entry(edge.source.clone())
            .or_insert(0.0);
    }

    residual
}

/// 路径总距离
///
/// 对每对相邻站点取第一条相连的边（任意方向）的距离；找不到边的段计 0。
pub fn path_distance(graph: &Graph, route: &[NodeId]) -> f64 {
    route
        .windows(2)
        .filter_map(|pair| graph.find_edge(pair[0].as_str(), pair[1].as_str()))
        .map(|edge| edge.weight)
        .sum()
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp<'a> {
    graph: &'a Graph,
    max_augmentations: usize,
}

impl<'a> EdmondsKarp<'a> {
    /// 创建算法实例
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            max_augmentations: DEFAULT_MAX_AUGMENTATIONS,
        }
    }

    /// 设置增广次数上限
    pub fn with_max_augmentations(mut self, limit: usize) -> Self {
        self.max_augmentations = limit;
        self
    }

    /// 计算从 source 到 sink 的最大流
    ///
    /// 源点或汇点不存在、或两者相同时，找不到任何增广路径，结果为零流。
    pub fn max_flow(&self, source: &str, sink: &str) -> MaxFlow {
        let mut residual = build_residual_graph(self.graph);
        let mut result = MaxFlow::empty();

        while let Some(route) = Self::bfs_find_path(&residual, source, sink) {
            if result.paths.len() >= self.max_augmentations {
                warn!(
                    source,
                    sink,
                    limit = self.max_augmentations,
                    "增广次数达到上限，提前结束"
                );
                break;
            }

            let bottleneck = route
                .windows(2)
                .map(|pair| residual_capacity(&residual, &pair[0], &pair[1]))
                .fold(f64::INFINITY, f64::min);

            // 沿路径增广
            for pair in route.windows(2) {
                let (u, v) = (&pair[0], &pair[1]);
                if let Some(forward) = residual.get_mut(u).and_then(|arcs| arcs.get_mut(v)) {
                    *forward -= bottleneck;
                }
                *residual
                    .entry(v.clone())
                    .or_default()
                    .entry(u.clone())
                    .or_insert(0.0) += bottleneck;
            }

            let distance = path_distance(self.graph, &route);
            debug!(hops = route.len() - 1, flow = bottleneck, distance, "找到增广路径");

            result.max_flow += bottleneck;
            result.paths.push(FlowPath {
                route,
                flow: bottleneck,
                distance,
            });
        }

        let covered: HashSet<&NodeId> = result
            .paths
            .iter()
            .flat_map(|path| path.route.iter())
            .collect();
        result.stations_covered = covered.len();

        debug!(
            source,
            sink,
            max_flow = result.max_flow,
            paths = result.paths.len(),
            "最大流计算完成"
        );

        result
    }

    /// BFS 找增广路径
    ///
    /// 只走剩余容量严格大于 0 的弧，发现汇点即返回。
    fn bfs_find_path(residual: &ResidualGraph, source: &str, sink: &str) -> Option<Vec<NodeId>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut queue = VecDeque::new();

        let (source, _) = residual.get_key_value(source)?;
        visited.insert(source.as_str());
        queue.push_back(source.as_str());

        while let Some(u) = queue.pop_front() {
            let Some(neighbors) = residual.get(u) else {
                continue;
            };

            for (v, &capacity) in neighbors {
                let v = v.as_str();
                if !visited.contains(v) && capacity > 0.0 {
                    visited.insert(v);
                    parent.insert(v, u);
                    queue.push_back(v);

                    if v == sink {
                        return Self::reconstruct_path(&parent, source.as_str(), v);
                    }
                }
            }
        }

        None
    }

    /// 沿父指针重构 source -> sink 路径
    fn reconstruct_path(
        parent: &HashMap<&str, &str>,
        source: &str,
        sink: &str,
    ) -> Option<Vec<NodeId>> {
        let mut path = vec![NodeId::from(sink)];
        let mut current = sink;
        while current != source {
            current = *parent.get(current)?;
            path.push(NodeId::from(current));
        }
        path.reverse();
        Some(path)
    }
}

fn residual_capacity(residual: &ResidualGraph, u: &NodeId, v: &NodeId) -> f64 {
    residual
        .get(u)
        .and_then(|arcs| arcs.get(v))
        .copied()
        .unwrap_or(0.0)
}

/// 以默认配置计算最大流
pub fn max_flow(graph: &Graph, source: &str, sink: &str) -> MaxFlow {
    EdmondsKarp::new(graph).max_flow(source, sink)
}
