//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全：首个单词补全命令，参数补全站点 ID

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
pub const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stations", "routes", "mst", "maxflow", "paths", "stats", "format",
];

/// 输出格式
const FORMATS: &[&str] = &["table", "json"];

/// PatrolGraph CLI 补全器
#[derive(Default)]
pub struct PatrolCompleter {
    stations: Vec<String>,
}

impl PatrolCompleter {
    pub fn new(stations: Vec<String>) -> Self {
        Self { stations }
    }

    /// 给定已输入的单词和当前前缀，返回候选
    fn candidates(&self, words: &[&str], prefix: &str) -> Vec<String> {
        let pool: Vec<&str> = match words.first() {
            None => COMMANDS.to_vec(),
            Some(&"maxflow") if words.len() <= 2 => self.station_refs(),
            Some(&"paths") if words.len() <= 2 => self.station_refs(),
            Some(&"format") if words.len() == 1 => FORMATS.to_vec(),
            _ => Vec::new(),
        };

        pool.into_iter()
            .filter(|c| c.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    fn station_refs(&self) -> Vec<&str> {
        self.stations.iter().map(String::as_str).collect()
    }
}

impl Completer for PatrolCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        // 光标在单词末尾时补全该单词，否则补全下一个单词
        let prefix = if line_to_cursor.ends_with(char::is_whitespace) {
            ""
        } else {
            words.pop().unwrap_or("")
        };
        let start = pos - prefix.len();

        let pairs = self
            .candidates(&words, prefix)
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();

        Ok((start, pairs))
    }
}

impl Hinter for PatrolCompleter {
    type Hint = String;
}

impl Highlighter for PatrolCompleter {}

impl Validator for PatrolCompleter {}

impl Helper for PatrolCompleter {}
