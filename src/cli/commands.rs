//! 交互命令处理

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::import::PatrolNetwork;
use crate::metrics::global_metrics;
use crate::planner::RoutePlanner;

use super::printer::{PrintMode, Printer};

/// 命令执行结果
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 交互会话：持有当前网络及其图
pub struct Session {
    network: PatrolNetwork,
    graph: Graph,
    planner: RoutePlanner,
    printer: Printer,
}

impl Session {
    pub fn new(network: PatrolNetwork, planner: RoutePlanner) -> Result<Self> {
        let graph = network.to_graph()?;
        Ok(Self {
            network,
            graph,
            planner,
            printer: Printer::default(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn printer_mut(&mut self) -> &mut Printer {
        &mut self.printer
    }

    /// 全部站点 ID，供补全使用
    pub fn station_ids(&self) -> Vec<String> {
        self.graph.node_ids().map(|id| id.to_string()).collect()
    }

    /// 解析并执行一行输入
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let mut parts = input.split_whitespace();
        let cmd = match parts.next() {
            Some(cmd) => cmd.to_lowercase(),
            None => return CommandResult::Continue,
        };
        let args: Vec<&str> = parts.collect();

        match cmd.as_str() {
            "help" | "h" | "?" => CommandResult::Message(Printer::help_text()),

            "quit" | "exit" | "q" => CommandResult::Exit,

            "stations" => CommandResult::Message(self.printer.stations(&self.network)),

            "routes" => CommandResult::Message(self.printer.routes(&self.network)),

            "mst" => {
                let report = self.planner.spanning_tree(&self.graph);
                CommandResult::Message(self.printer.spanning_tree(&self.graph, &report))
            }

            "maxflow" | "flow" => self.max_flow(&args),

            "paths" | "path" => self.shortest_paths(&args),

            "stats" => CommandResult::Message(self.printer.metrics(&global_metrics().snapshot())),

            "format" => match args.first().copied() {
                Some("table") => {
                    self.printer.set_mode(PrintMode::Table);
                    CommandResult::Message("输出格式: table".to_string())
                }
                Some("json") => {
                    self.printer.set_mode(PrintMode::Json);
                    CommandResult::Message("输出格式: json".to_string())
                }
                _ => CommandResult::Error("用法: format <table|json>".to_string()),
            },

            _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
        }
    }

    /// 未指定时源点取第一个站点，汇点取最后一个站点
    fn max_flow(&self, args: &[&str]) -> CommandResult {
        let ids = self.station_ids();
        let (Some(first), Some(last)) = (ids.first(), ids.last()) else {
            return CommandResult::Error("网络中没有站点".to_string());
        };

        let source = args.first().copied().unwrap_or(first.as_str());
        let sink = args.get(1).copied().unwrap_or(last.as_str());
        if source == sink {
            return CommandResult::Error("源站和汇站不能相同".to_string());
        }

        match self.planner.max_flow(&self.graph, source, sink) {
            Ok(report) => CommandResult::Message(self.printer.max_flow(&self.graph, &report)),
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    /// 未指定时起点取第一个站点
    fn shortest_paths(&self, args: &[&str]) -> CommandResult {
        let ids = self.station_ids();
        let Some(first) = ids.first() else {
            return CommandResult::Error("网络中没有站点".to_string());
        };

        let source = args.first().copied().unwrap_or(first.as_str());
        let target = args.get(1).copied();
        if let Some(target) = target {
            if !self.graph.contains_node(target) {
                return CommandResult::Error(Error::UnknownStation(target.to_string()).to_string());
            }
        }

        match self.planner.shortest_paths(&self.graph, source) {
            Ok(report) => {
                CommandResult::Message(self.printer.shortest_paths(&self.graph, &report, target))
            }
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::metrics::Metrics;
    use std::sync::Arc;

    fn session() -> Session {
        let planner =
            RoutePlanner::with_metrics(AnalysisConfig::default(), Arc::new(Metrics::new()));
        Session::new(PatrolNetwork::builtin().unwrap(), planner).unwrap()
    }

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(text) => text,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_commands() {
        let mut session = session();
        assert_eq!(session.execute("   "), CommandResult::Continue);
        assert_eq!(session.execute("quit"), CommandResult::Exit);
        assert_eq!(session.execute("Q"), CommandResult::Exit);
        assert!(message(session.execute("help")).contains("maxflow"));
        assert!(matches!(session.execute("teleport"), CommandResult::Error(_)));
    }

    #[test]
    fn test_max_flow_defaults_to_first_and_last_station() {
        let mut session = session();
        let output = message(session.execute("maxflow"));
        assert!(output.contains("最大流: 11"));
    }

    #[test]
    fn test_max_flow_errors() {
        let mut session = session();
        assert!(matches!(
            session.execute("maxflow dhikala nowhere"),
            CommandResult::Error(msg) if msg.contains("nowhere")
        ));
        assert!(matches!(
            session.execute("maxflow dhikala dhikala"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_paths_with_target() {
        let mut session = session();
        let output = message(session.execute("paths dhikala jhirna"));
        assert!(output.contains("Jhirna Checkpost"));

        assert!(matches!(
            session.execute("paths dhikala atlantis"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_format_switch() {
        let mut session = session();
        message(session.execute("format json"));
        let output = message(session.execute("mst"));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["edges"].as_array().map(|a| a.len()), Some(7));

        assert!(matches!(session.execute("format yaml"), CommandResult::Error(_)));
    }

    #[test]
    fn test_station_ids() {
        let ids = session().station_ids();
        assert_eq!(ids.len(), 8);
        assert_eq!(ids.first().map(String::as_str), Some("dhikala"));
        assert_eq!(ids.last().map(String::as_str), Some("sonanadi"));
    }
}
