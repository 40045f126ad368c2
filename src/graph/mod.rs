//! 图核心模块
//!
//! 定义站点、路线和图的核心数据结构

mod edge;
mod graph;
mod node;

pub use edge::Edge;
pub use graph::Graph;
pub use node::{Node, NodeId};
