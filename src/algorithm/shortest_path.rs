//! 单源最短路径
//!
//! Bellman-Ford 算法。巡逻路线双向可通行，每轮对每条边做两个方向的松弛。
//! 注意与最大流不同：最大流的容量按边定义的方向计算。

use crate::graph::{Graph, NodeId};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

/// 最短路径结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPaths {
    /// 起点
    pub source: NodeId,
    /// 各站点到起点的最短距离，不可达为无穷大（JSON 中为 null）
    #[serde(serialize_with = "serialize_distances")]
    pub distances: IndexMap<NodeId, f64>,
    /// 最短路径上的前驱站点
    pub predecessors: IndexMap<NodeId, Option<NodeId>>,
    /// 固定轮数后仍可松弛，说明存在负权环，结果不保证最优
    pub negative_cycle: bool,
}

impl ShortestPaths {
    /// 到 target 的有限距离；不可达或未知站点返回 None
    pub fn distance(&self, target: &str) -> Option<f64> {
        self.distances
            .get(target)
            .copied()
            .filter(|d| d.is_finite())
    }

    pub fn is_reachable(&self, target: &str) -> bool {
        self.distance(target).is_some()
    }

    /// 重构到 target 的路径
    pub fn path_to(&self, target: &str) -> PathTrace {
        reconstruct_path(&self.predecessors, self.source.as_str(), target)
    }

    /// 所有可达站点（不含起点）的完整路径
    pub fn routes(&self) -> IndexMap<NodeId, Vec<NodeId>> {
        self.distances
            .keys()
            .filter(|id| **id != self.source && self.is_reachable(id.as_str()))
            .filter_map(|id| {
                let trace = self.path_to(id.as_str());
                trace.complete.then(|| (id.clone(), trace.route))
            })
            .collect()
    }
}

/// 由前驱表重构出的路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTrace {
    /// 从起点（或中断处）到目标的站点序列
    pub route: Vec<NodeId>,
    /// 是否一直回溯到了起点
    pub complete: bool,
}

/// 沿前驱链从 target 回溯到 source
///
/// 遇到空前驱即停止，返回 `complete == false` 的部分路径，调用方应视为无效。
/// 负权环可能让前驱链成环，回溯步数以站点数为上限。
pub fn reconstruct_path(
    predecessors: &IndexMap<NodeId, Option<NodeId>>,
    source: &str,
    target: &str,
) -> PathTrace {
    let mut route = vec![NodeId::from(target)];
    let mut current = target;
    let mut complete = true;

    while current != source {
        match predecessors.get(current).and_then(|p| p.as_ref()) {
            Some(prev) if route.len() <= predecessors.len() => {
                route.push(prev.clone());
                current = prev.as_str();
            }
            _ => {
                complete = false;
                break;
            }
        }
    }

    route.reverse();
    PathTrace { route, complete }
}

/// 计算从 source 出发的单源最短路径
///
/// 初始化后做 `节点数 - 1` 轮无向松弛（某轮无变化时提前结束），
/// 再检查一轮；仍能松弛则记录负权环并输出警告，但照常返回当前结果。
/// 不在节点集中的起点不会被加入结果，所有站点保持不可达。
pub fn shortest_paths(graph: &Graph, source: &str) -> ShortestPaths {
    let mut distances: IndexMap<NodeId, f64> = graph
        .node_ids()
        .map(|id| (id.clone(), f64::INFINITY))
        .collect();
    let mut predecessors: IndexMap<NodeId, Option<NodeId>> =
        graph.node_ids().map(|id| (id.clone(), None)).collect();

    if let Some(distance) = distances.get_mut(source) {
        *distance = 0.0;
    }

    for _ in 1..graph.node_count() {
        let mut changed = false;
        for edge in graph.edges() {
            changed |= relax(
                &mut distances,
                &mut predecessors,
                &edge.source,
                &edge.target,
                edge.weight,
            );
            changed |= relax(
                &mut distances,
                &mut predecessors,
                &edge.target,
                &edge.source,
                edge.weight,
            );
        }
        if !changed {
            break;
        }
    }

    let negative_cycle = graph.edges().iter().any(|edge| {
        improves(&distances, &edge.source, &edge.target, edge.weight)
            || improves(&distances, &edge.target, &edge.source, edge.weight)
    });
    if negative_cycle {
        warn!(source, "图中存在负权环，最短路径结果不可靠");
    }

    ShortestPaths {
        source: NodeId::from(source),
        distances,
        predecessors,
        negative_cycle,
    }
}

fn distance_of(distances: &IndexMap<NodeId, f64>, id: &NodeId) -> f64 {
    distances.get(id).copied().unwrap_or(f64::INFINITY)
}

fn improves(distances: &IndexMap<NodeId, f64>, from: &NodeId, to: &NodeId, weight: f64) -> bool {
    distances
        .get(to)
        .is_some_and(|&current| distance_of(distances, from) + weight < current)
}

fn relax(
    distances: &mut IndexMap<NodeId, f64>,
    predecessors: &mut IndexMap<NodeId, Option<NodeId>>,
    from: &NodeId,
    to: &NodeId,
    weight: f64,
) -> bool {
    let candidate = distance_of(distances, from) + weight;
    match distances.get_mut(to) {
        Some(current) if candidate < *current => {
            *current = candidate;
            if let Some(prev) = predecessors.get_mut(to) {
                *prev = Some(from.clone());
            }
            true
        }
        _ => false,
    }
}

fn serialize_distances<S>(
    distances: &IndexMap<NodeId, f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(distances.len()))?;
    for (id, distance) in distances {
        map.serialize_entry(id, &distance.is_finite().then_some(*distance))?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn graph_of(ids: &[&str], edges: &[(&str, &str, f64)]) -> Graph {
        Graph::new(
            ids.iter().map(|id| Node::new(*id, *id, 0.0, 0.0)).collect(),
            edges
                .iter()
                .map(|(a, b, w)| Edge::new(*a, *b, *w))
                .collect(),
        )
    }

    fn triangle() -> Graph {
        graph_of(
            &["A", "B", "C"],
            &[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)],
        )
    }

    #[test]
    fn test_triangle() {
        let result = shortest_paths(&triangle(), "A");

        assert_eq!(result.distances["A"], 0.0);
        assert_eq!(result.distances["B"], 1.0);
        assert_eq!(result.distances["C"], 2.0);
        assert_eq!(result.predecessors["C"], Some(NodeId::from("B")));
        assert_eq!(result.predecessors["A"], None);
        assert!(!result.negative_cycle);
    }

    #[test]
    fn test_edges_are_undirected() {
        let graph = graph_of(&["A", "B", "C"], &[("B", "A", 2.0), ("C", "B", 3.0)]);
        let result = shortest_paths(&graph, "A");

        assert_eq!(result.distance("C"), Some(5.0));
        assert_eq!(result.predecessors["B"], Some(NodeId::from("A")));
    }

    #[test]
    fn test_unreachable_node() {
        let mut graph = triangle();
        graph.add_node(Node::new("D", "D", 0.0, 0.0));
        let result = shortest_paths(&graph, "A");

        assert!(result.distances["D"].is_infinite());
        assert_eq!(result.predecessors["D"], None);
        assert_eq!(result.distance("D"), None);
        assert!(!result.is_reachable("D"));
    }

    #[test]
    fn test_unknown_source() {
        let result = shortest_paths(&triangle(), "Z");

        assert_eq!(result.distances.len(), 3);
        assert!(result.distances.values().all(|d| d.is_infinite()));
        assert!(result.predecessors.values().all(Option::is_none));
    }

    #[test]
    fn test_negative_cycle_is_flagged() {
        let graph = graph_of(&["A", "B", "C"], &[("A", "B", 1.0), ("B", "C", -2.0)]);
        let result = shortest_paths(&graph, "A");

        assert!(result.negative_cycle);
        assert_eq!(result.distances.len(), 3);
    }

    #[test]
    fn test_path_reconstruction() {
        let result = shortest_paths(&triangle(), "A");

        let trace = result.path_to("C");
        assert!(trace.complete);
        let route: Vec<&str> = trace.route.iter().map(|id| id.as_str()).collect();
        assert_eq!(route, vec!["A", "B", "C"]);

        let trace = result.path_to("A");
        assert!(trace.complete);
        assert_eq!(trace.route, vec![NodeId::from("A")]);
    }

    #[test]
    fn test_path_reconstruction_disconnected() {
        let mut graph = triangle();
        graph.add_node(Node::new("D", "D", 0.0, 0.0));
        let result = shortest_paths(&graph, "A");

        let trace = result.path_to("D");
        assert!(!trace.complete);
        assert_eq!(trace.route, vec![NodeId::from("D")]);
    }

    #[test]
    fn test_reconstruct_path_stops_on_cycle() {
        let mut predecessors = IndexMap::new();
        predecessors.insert(NodeId::from("S"), None);
        predecessors.insert(NodeId::from("A"), Some(NodeId::from("B")));
        predecessors.insert(NodeId::from("B"), Some(NodeId::from("A")));

        let trace = reconstruct_path(&predecessors, "S", "A");
        assert!(!trace.complete);
        assert!(trace.route.len() <= predecessors.len() + 1);
    }

    #[test]
    fn test_routes_skip_source_and_unreachable() {
        let mut graph = triangle();
        graph.add_node(Node::new("D", "D", 0.0, 0.0));
        let routes = shortest_paths(&graph, "A").routes();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes["C"].len(), 3);
        assert!(!routes.contains_key("D"));
    }

    #[test]
    fn test_serialize_infinity_as_null() {
        let mut graph = triangle();
        graph.add_node(Node::new("D", "D", 0.0, 0.0));
        let json = serde_json::to_value(shortest_paths(&graph, "A")).unwrap();

        assert_eq!(json["distances"]["C"], 2.0);
        assert!(json["distances"]["D"].is_null());
        assert_eq!(json["predecessors"]["C"], "B");
        assert_eq!(json["negativeCycle"], false);
    }

    #[test]
    fn test_idempotent_and_input_untouched() {
        let graph = triangle();
        let before = graph.clone();
        assert_eq!(shortest_paths(&graph, "A"), shortest_paths(&graph, "A"));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_random_graphs_against_floyd_warshall() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let n = rng.gen_range(1..8);
            let ids: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
            let raw: Vec<(usize, usize, f64)> = (0..rng.gen_range(0..n * 3))
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_range(0..15) as f64))
                .collect();

            let mut expected = vec![vec![f64::INFINITY; n]; n];
            for (i, row) in expected.iter_mut().enumerate() {
                row[i] = 0.0;
            }
            for &(a, b, w) in &raw {
                expected[a][b] = expected[a][b].min(w);
                expected[b][a] = expected[b][a].min(w);
            }
            for k in 0..n {
                for i in 0..n {
                    for j in 0..n {
                        let via = expected[i][k] + expected[k][j];
                        if via < expected[i][j] {
                            expected[i][j] = via;
                        }
                    }
                }
            }

            let graph = Graph::new(
                ids.iter().map(|id| Node::new(id.as_str(), id.as_str(), 0.0, 0.0)).collect(),
                raw.iter()
                    .map(|(a, b, w)| Edge::new(ids[*a].as_str(), ids[*b].as_str(), *w))
                    .collect(),
            );
            let result = shortest_paths(&graph, ids[0].as_str());

            assert!(!result.negative_cycle);
            for (j, id) in ids.iter().enumerate() {
                assert_eq!(result.distances[id.as_str()], expected[0][j]);
                if result.is_reachable(id) {
                    assert!(result.path_to(id).complete);
                }
            }
        }
    }
}
