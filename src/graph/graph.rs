//! 图数据结构
//!
//! `{nodes, edges}` 形式的内存图，算法调用期间只读

use super::edge::Edge;
use super::node::{Node, NodeId};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 巡逻网络图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// 创建图（不校验）
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// 创建并校验图
    pub fn try_new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let graph = Self::new(nodes, edges);
        graph.validate()?;
        Ok(graph)
    }

    /// 添加站点
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// 添加路线
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 按 ID 查找站点
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// 查找连接 a、b 的第一条边（任意方向）
    pub fn find_edge(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    /// 节点 ID 列表（保持原顺序）
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|n| &n.id)
    }

    /// 校验图的结构约束
    ///
    /// 站点 ID 唯一；每条边的端点都存在；距离和容量为有限非负数。
    /// 不要求连通。
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(Error::DuplicateStation(node.id.to_string()));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(Error::UnknownStation(endpoint.to_string()));
                }
            }

            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(Error::InvalidRoute(format!(
                    "{} - {} 的距离无效: {}",
                    edge.source, edge.target, edge.weight
                )));
            }

            if let Some(capacity) = edge.capacity {
                if !capacity.is_finite() || capacity < 0.0 {
                    return Err(Error::InvalidRoute(format!(
                        "{} - {} 的容量无效: {}",
                        edge.source, edge.target, capacity
                    )));
                }
            }
        }

        Ok(())
    }
}
