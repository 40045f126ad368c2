//! 站点（节点）定义

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// 站点 ID（图内唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 站点
///
/// 坐标只供展示层在地图上绘制，算法不读取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 站点 ID
    pub id: NodeId,
    /// 显示名称
    #[serde(alias = "name")]
    pub label: String,
    /// 纬度
    pub lat: f64,
    /// 经度
    pub lng: f64,
}

impl Node {
    /// 创建站点
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            lat,
            lng,
        }
    }
}
