//! 数据导入模块
//!
//! 从 JSON 或 CSV 加载巡逻站点和路线，并构建算法使用的图

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Node};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// 内置示例数据：吉姆·科比特国家公园的护林站
const BUILTIN_NETWORK: &str = include_str!("../../data/corbett.json");

/// 护林站
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    /// 站点类型（数据中为 `type`）
    #[serde(rename = "type", default)]
    pub kind: String,
    /// 驻守护林员人数
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// 巡逻路线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub from_id: String,
    pub to_id: String,
    /// 距离（公里）
    pub distance: f64,
    /// 可同时调度的巡逻力量，缺省时按距离计
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

/// CSV 中的站点行，resources 以分号分隔
#[derive(Debug, Deserialize)]
struct StationRecord {
    id: String,
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    capacity: Option<u32>,
    lat: f64,
    lng: f64,
    #[serde(default)]
    resources: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Self {
        let resources = record
            .resources
            .map(|list| {
                list.split(';')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: record.id,
            name: record.name,
            kind: record.kind,
            capacity: record.capacity.unwrap_or_default(),
            resources,
            notes: record.notes.filter(|n| !n.is_empty()),
            lat: record.lat,
            lng: record.lng,
        }
    }
}

/// 巡逻网络：站点 + 路线
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatrolNetwork {
    pub stations: Vec<Station>,
    pub routes: Vec<Route>,
}

impl PatrolNetwork {
    /// 内置示例网络
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_NETWORK)
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ParseError(format!("JSON 格式错误: {}", e)))
    }

    /// 从 JSON 文件加载
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut content = String::new();
        BufReader::new(File::open(path.as_ref())?).read_to_string(&mut content)?;
        let network = Self::from_json_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            stations = network.stations.len(),
            routes = network.routes.len(),
            "已加载巡逻网络"
        );
        Ok(network)
    }

    /// 从站点 CSV 和路线 CSV 加载（均带表头）
    pub fn load_csv<P: AsRef<Path>, Q: AsRef<Path>>(stations: P, routes: Q) -> Result<Self> {
        let stations: Vec<Station> = read_csv::<StationRecord, _>(stations.as_ref())?
            .into_iter()
            .map(Station::from)
            .collect();
        let routes: Vec<Route> = read_csv(routes.as_ref())?;

        info!(stations = stations.len(), routes = routes.len(), "已从 CSV 加载巡逻网络");
        Ok(Self { stations, routes })
    }

    /// 按 ID 查找站点
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// 构建图并校验
    ///
    /// 站点 → 节点（名称作为标签），路线 → 边（距离作为权重）。
    pub fn to_graph(&self) -> Result<Graph> {
        let nodes = self
            .stations
            .iter()
            .map(|s| Node::new(s.id.as_str(), s.name.as_str(), s.lat, s.lng))
            .collect();
        let edges = self
            .routes
            .iter()
            .map(|r| Edge {
                source: r.from_id.as_str().into(),
                target: r.to_id.as_str().into(),
                weight: r.distance,
                capacity: r.capacity,
            })
            .collect();

        Graph::try_new(nodes, edges)
    }
}

fn read_csv<T, P>(path: P) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::ParseError(format!("无法读取 {}: {}", path.display(), e)))?;

    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| {
            row.map_err(|e| {
                Error::ParseError(format!("{} 第 {} 行格式错误: {}", path.display(), i + 2, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{max_flow, minimum_spanning_tree, shortest_paths};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_builtin_network() {
        let network = PatrolNetwork::builtin().unwrap();
        assert_eq!(network.stations.len(), 8);
        assert_eq!(network.routes.len(), 12);

        let dhikala = network.station("dhikala").unwrap();
        assert_eq!(dhikala.kind, "Range HQ");
        assert_eq!(dhikala.resources.len(), 3);
        assert!(network.station("sarpduli").unwrap().notes.is_none());

        let graph = network.to_graph().unwrap();
        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.edge_count(), 12);
        assert_eq!(
            graph.find_edge("sonanadi", "dhela").and_then(|e| e.capacity),
            None
        );
    }

    #[test]
    fn test_algorithms_on_builtin_network() {
        let graph = PatrolNetwork::builtin().unwrap().to_graph().unwrap();

        let tree = minimum_spanning_tree(&graph);
        assert_eq!(tree.len(), 7);
        let total: f64 = tree.iter().map(|e| e.weight).sum();
        assert!((total - 54.4).abs() < 1e-9);

        let flow = max_flow(&graph, "dhikala", "sonanadi");
        assert!((flow.max_flow - 11.0).abs() < 1e-9);

        let paths = shortest_paths(&graph, "dhikala");
        assert!(paths.distances.values().all(|d| d.is_finite()));
        assert!(!paths.negative_cycle);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "stations": [
                    {{"id": "a", "name": "Alpha", "lat": 1.0, "lng": 2.0}},
                    {{"id": "b", "name": "Bravo", "type": "Outpost", "lat": 1.5, "lng": 2.5}}
                ],
                "routes": [{{"fromId": "a", "toId": "b", "distance": 3.0}}]
            }}"#
        )
        .unwrap();

        let network = PatrolNetwork::load_json(file.path()).unwrap();
        assert_eq!(network.stations[0].kind, "");
        assert_eq!(network.stations[1].kind, "Outpost");
        assert_eq!(network.routes[0].capacity, None);

        let graph = network.to_graph().unwrap();
        assert_eq!(graph.node("a").map(|n| n.label.as_str()), Some("Alpha"));
    }

    #[test]
    fn test_load_csv_files() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("stations.csv");
        let routes = dir.path().join("routes.csv");

        std::fs::write(
            &stations,
            "id,name,type,capacity,lat,lng,resources,notes\n\
             a,Alpha,Outpost,4,29.5,78.7,Radio; Jeep,\n\
             b,Bravo,Watchtower,,29.6,78.8,,Flood prone\n",
        )
        .unwrap();
        std::fs::write(
            &routes,
            "fromId,toId,distance,capacity\n\
             a,b,4.5,2\n\
             b,a,6.0,\n",
        )
        .unwrap();

        let network = PatrolNetwork::load_csv(&stations, &routes).unwrap();
        assert_eq!(network.stations[0].resources, vec!["Radio", "Jeep"]);
        assert!(network.stations[0].notes.is_none());
        assert_eq!(network.stations[0].capacity, 4);
        assert_eq!(network.stations[1].capacity, 0);
        assert!(network.stations[1].resources.is_empty());
        assert_eq!(network.stations[1].notes.as_deref(), Some("Flood prone"));
        assert_eq!(network.routes[0].capacity, Some(2.0));
        assert_eq!(network.routes[1].capacity, None);
        assert!(network.to_graph().is_ok());
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(
            PatrolNetwork::from_json_str("{ not json"),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            PatrolNetwork::load_json("/definitely/missing/network.json"),
            Err(Error::IoError(_))
        ));

        let network = PatrolNetwork {
            stations: vec![],
            routes: vec![Route {
                from_id: "x".to_string(),
                to_id: "y".to_string(),
                distance: 1.0,
                capacity: None,
            }],
        };
        assert!(matches!(network.to_graph(), Err(Error::UnknownStation(_))));
    }
}
