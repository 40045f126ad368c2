//! PatrolGraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use patrolgraph::cli::{CommandResult, PatrolCompleter, PrintMode, Session};
use patrolgraph::config::AppConfig;
use patrolgraph::import::PatrolNetwork;
use patrolgraph::logging::init_tracing;
use patrolgraph::planner::RoutePlanner;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "patrolgraph-cli")]
#[command(about = "PatrolGraph 巡逻路线规划命令行工具")]
struct Args {
    /// 配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 巡逻网络 JSON 文件
    #[arg(short, long, conflicts_with_all = ["stations", "routes"])]
    data: Option<PathBuf>,

    /// 站点 CSV 文件
    #[arg(long, requires = "routes")]
    stations: Option<PathBuf>,

    /// 路线 CSV 文件
    #[arg(long, requires = "stations")]
    routes: Option<PathBuf>,

    /// 巡逻速度（公里/小时）
    #[arg(long)]
    speed: Option<f64>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 以 JSON 格式输出
    #[arg(long)]
    json: bool,
}

/// 交互输出与日志共用终端，未提供配置文件时只输出警告
const CONSOLE_LOG_FILTER: &str = "warn";

fn log_filter<'a>(args: &Args, config: &'a AppConfig) -> &'a str {
    if args.config.is_some() {
        &config.log_filter
    } else {
        CONSOLE_LOG_FILTER
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(speed) = args.speed {
        config.analysis.patrol_speed_kmh = speed;
    }
    config.validate()?;

    init_tracing(log_filter(&args, &config));

    let network = match (&args.data, &args.stations, &args.routes) {
        (Some(path), _, _) => PatrolNetwork::load_json(path)
            .with_context(|| format!("无法加载巡逻网络 {}", path.display()))?,
        (None, Some(stations), Some(routes)) => PatrolNetwork::load_csv(stations, routes)
            .context("无法加载 CSV 巡逻网络")?,
        _ => config.load_network().context("无法加载巡逻网络")?,
    };

    let mut session = Session::new(network, RoutePlanner::new(config.analysis.clone()))?;
    if args.json {
        session.printer_mut().set_mode(PrintMode::Json);
    }

    // 单个命令模式
    if let Some(command) = args.execute {
        return match session.execute(&command) {
            CommandResult::Error(msg) => Err(anyhow::anyhow!(msg)),
            CommandResult::Message(text) => {
                print!("{}", text);
                Ok(())
            }
            CommandResult::Continue | CommandResult::Exit => Ok(()),
        };
    }

    println!("{}", "PatrolGraph CLI - 巡逻路线规划".green().bold());
    println!("=============================================");
    println!(
        "  站点数: {}  路线数: {}",
        session.graph().node_count(),
        session.graph().edge_count()
    );
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<PatrolCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(PatrolCompleter::new(session.station_ids())));

    loop {
        match editor.readline("patrolgraph> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match session.execute(line) {
                    CommandResult::Continue => {}
                    CommandResult::Exit => break,
                    CommandResult::Message(text) => println!("{}", text),
                    CommandResult::Error(msg) => eprintln!("{} {}", "错误:".red().bold(), msg),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("再见！");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_follows_config_file() {
        let config = AppConfig {
            log_filter: "debug".to_string(),
            ..AppConfig::default()
        };

        let args = Args::parse_from(["patrolgraph-cli", "--config", "patrol.json"]);
        assert_eq!(log_filter(&args, &config), "debug");

        let args = Args::parse_from(["patrolgraph-cli"]);
        assert_eq!(log_filter(&args, &AppConfig::default()), CONSOLE_LOG_FILTER);
    }
}
