//! 结果打印器
//!
//! 提供表格和 JSON 两种输出格式

use crate::algorithm::RouteSummary;
use crate::graph::{Graph, NodeId};
use crate::import::PatrolNetwork;
use crate::metrics::MetricsSnapshot;
use crate::planner::{MaxFlowReport, ShortestPathReport, SpanningTreeReport};
use prettytable::{format, row, Table};
use serde::Serialize;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// JSON 模式
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 站点列表
    pub fn stations(&self, network: &PatrolNetwork) -> String {
        if self.mode == PrintMode::Json {
            return to_json(&network.stations);
        }

        let mut table = new_table();
        table.set_titles(row!["ID", "Name", "Type", "Rangers", "Resources", "Lat", "Lng"]);
        for s in &network.stations {
            table.add_row(row![
                s.id,
                s.name,
                s.kind,
                s.capacity,
                s.resources.join(", "),
                format!("{:.4}", s.lat),
                format!("{:.4}", s.lng)
            ]);
        }
        format!("{}{} station(s)\n", table, network.stations.len())
    }

    /// 路线列表
    pub fn routes(&self, network: &PatrolNetwork) -> String {
        if self.mode == PrintMode::Json {
            return to_json(&network.routes);
        }

        let mut table = new_table();
        table.set_titles(row!["From", "To", "Distance (km)", "Capacity"]);
        for r in &network.routes {
            let capacity = r
                .capacity
                .map(|c| format!("{}", c))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(row![r.from_id, r.to_id, format!("{:.1}", r.distance), capacity]);
        }
        format!("{}{} route(s)\n", table, network.routes.len())
    }

    /// 最小生成树
    pub fn spanning_tree(&self, graph: &Graph, report: &SpanningTreeReport) -> String {
        if self.mode == PrintMode::Json {
            return to_json(report);
        }

        let mut table = new_table();
        table.set_titles(row!["From", "To", "Distance (km)"]);
        for edge in &report.edges {
            table.add_row(row![
                station_label(graph, &edge.source),
                station_label(graph, &edge.target),
                format!("{:.1}", edge.weight)
            ]);
        }

        let mut output = table.to_string();
        if report.edges.len() + 1 < graph.node_count() {
            output.push_str("注意: 网络不连通，结果为最小生成森林\n");
        }
        output.push_str(&self.summary(&report.summary));
        output
    }

    /// 最大流
    pub fn max_flow(&self, graph: &Graph, report: &MaxFlowReport) -> String {
        if self.mode == PrintMode::Json {
            return to_json(report);
        }

        let mut table = new_table();
        table.set_titles(row!["#", "Route", "Flow", "Distance (km)"]);
        for (i, path) in report.result.paths.iter().enumerate() {
            table.add_row(row![
                i + 1,
                route_labels(graph, &path.route),
                path.flow,
                format!("{:.1}", path.distance)
            ]);
        }

        format!(
            "{}最大流: {}\n{}",
            table,
            report.result.max_flow,
            self.summary(&report.summary)
        )
    }

    /// 最短路径；指定 target 时只显示该站点
    pub fn shortest_paths(
        &self,
        graph: &Graph,
        report: &ShortestPathReport,
        target: Option<&str>,
    ) -> String {
        if self.mode == PrintMode::Json {
            return to_json(report);
        }

        let mut table = new_table();
        table.set_titles(row!["Station", "Distance (km)", "Route"]);
        for (id, distance) in &report.result.distances {
            if target.is_some_and(|t| t != id.as_str()) {
                continue;
            }

            let (distance, route) = if distance.is_finite() {
                let route = report
                    .routes
                    .get(id)
                    .map(|r| route_labels(graph, r))
                    .unwrap_or_else(|| station_label(graph, id));
                (format!("{:.1}", distance), route)
            } else {
                ("unreachable".to_string(), "-".to_string())
            };
            table.add_row(row![station_label(graph, id), distance, route]);
        }

        let mut output = table.to_string();
        if report.result.negative_cycle {
            output.push_str("警告: 检测到负权环，距离可能不是最优\n");
        }
        output.push_str(&self.summary(&report.summary));
        output
    }

    /// 运行指标
    pub fn metrics(&self, snapshot: &MetricsSnapshot) -> String {
        if self.mode == PrintMode::Json {
            return to_json(snapshot);
        }

        let mut table = new_table();
        table.set_titles(row!["Metric", "Value"]);
        table.add_row(row!["MST runs", snapshot.mst_runs]);
        table.add_row(row!["Max-flow runs", snapshot.max_flow_runs]);
        table.add_row(row!["Shortest-path runs", snapshot.shortest_path_runs]);
        table.add_row(row!["Augmenting paths", snapshot.augmenting_paths]);
        table.add_row(row!["Negative cycles", snapshot.negative_cycles]);
        table.add_row(row!["Failed requests", snapshot.failed_requests]);
        table.add_row(row!["Uptime (s)", snapshot.uptime_seconds]);
        table.to_string()
    }

    fn summary(&self, summary: &RouteSummary) -> String {
        format!(
            "总距离: {:.1} km | 覆盖站点: {} / {} | 预计巡逻时间: {}\n",
            summary.total_distance_km,
            summary.stations_covered,
            summary.total_stations,
            summary.estimated_time
        )
    }

    /// 帮助信息
    pub fn help_text() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   PatrolGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

  help, h, ?                 显示帮助
  quit, exit, q              退出程序

  stations                   列出护林站
  routes                     列出巡逻路线

  mst                        最小生成树（覆盖全部站点的最短路网）
  maxflow <源站> <汇站>      最大流（两站之间可同时调度的巡逻力量）
                             示例: maxflow dhikala sonanadi
  paths <起点> [终点]        单源最短路径
                             示例: paths dhikala jhirna

  stats                      显示运行指标
  format <table|json>        切换输出格式

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{}\n", json),
        Err(e) => format!("序列化失败: {}\n", e),
    }
}

fn station_label(graph: &Graph, id: &NodeId) -> String {
    graph
        .node(id.as_str())
        .map(|n| n.label.clone())
        .unwrap_or_else(|| id.to_string())
}

fn route_labels(graph: &Graph, route: &[NodeId]) -> String {
    route
        .iter()
        .map(|id| station_label(graph, id))
        .collect::<Vec<_>>()
        .join(" → ")
}
