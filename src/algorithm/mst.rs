//! 最小生成树
//!
//! Kruskal 算法：按距离升序（稳定排序）扫描路线，
//! 用带路径压缩的并查集判断是否成环。

use crate::graph::{Edge, Graph};
use std::collections::HashMap;
use tracing::debug;

/// 并查集（按下标）
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// 每个元素自成一个集合
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    /// 查找根节点并压缩路径
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// 合并两个集合，已在同一集合时返回 false
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        self.parent[root_a] = root_b;
        true
    }
}

/// 计算最小生成树
///
/// 图不连通时返回最小生成森林（边数少于 `节点数 - 1`），不报错。
/// 端点不在节点集中的边被跳过。输入图不会被修改。
pub fn minimum_spanning_tree(graph: &Graph) -> Vec<Edge> {
    let index: HashMap<&str, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    // sort_by 是稳定排序，同距离的边保持输入顺序
    let mut candidates: Vec<&Edge> = graph.edges().iter().collect();
    candidates.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let target = graph.node_count().saturating_sub(1);
    let mut sets = DisjointSet::new(graph.node_count());
    let mut tree = Vec::with_capacity(target);

    for edge in candidates {
        if tree.len() == target {
            break;
        }

        let (Some(&a), Some(&b)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            debug!(source = %edge.source, target = %edge.target, "跳过端点未知的路线");
            continue;
        };

        if sets.union(a, b) {
            tree.push(edge.clone());
        }
    }

    if tree.len() < target {
        debug!(
            edges = tree.len(),
            nodes = graph.node_count(),
            "图不连通，返回最小生成森林"
        );
    }

    tree
}
