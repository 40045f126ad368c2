//! 巡逻路线（边）定义
//!
//! 最小生成树和最短路径把边视为双向可通行；
//! 最大流按边的方向建立正向容量弧和零容量反向弧。

use crate::graph::node::NodeId;
use serde::{Deserialize, Serialize};

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 起点站 ID
    pub source: NodeId,
    /// 终点站 ID
    pub target: NodeId,
    /// 距离（非负）
    pub weight: f64,
    /// 流量容量，缺省时使用距离
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

impl Edge {
    /// 创建新边
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            capacity: None,
        }
    }

    /// 设置容量
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// 最大流使用的容量
    pub fn effective_capacity(&self) -> f64 {
        self.capacity.unwrap_or(self.weight)
    }

    /// 是否连接 a 和 b（任意方向）
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source.as_str() == a && self.target.as_str() == b)
            || (self.source.as_str() == b && self.target.as_str() == a)
    }
}
