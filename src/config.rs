//! 配置
//!
//! 所有字段都有默认值，可从 JSON 文件部分覆盖，命令行参数再覆盖文件

use crate::algorithm::{DEFAULT_MAX_AUGMENTATIONS, DEFAULT_PATROL_SPEED_KMH};
use crate::error::{Error, Result};
use crate::import::PatrolNetwork;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 服务器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 算法与统计参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 估算巡逻时长所用速度（公里/小时）
    pub patrol_speed_kmh: f64,
    /// 最大流增广次数上限
    pub max_augmentations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            patrol_speed_kmh: DEFAULT_PATROL_SPEED_KMH,
            max_augmentations: DEFAULT_MAX_AUGMENTATIONS,
        }
    }
}

/// 数据来源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum DatasetSource {
    /// `{stations, routes}` JSON 文件
    Json { path: PathBuf },
    /// 站点 CSV + 路线 CSV
    Csv { stations: PathBuf, routes: PathBuf },
}

impl DatasetSource {
    /// 加载巡逻网络
    pub fn load(&self) -> Result<PatrolNetwork> {
        match self {
            DatasetSource::Json { path } => PatrolNetwork::load_json(path),
            DatasetSource::Csv { stations, routes } => PatrolNetwork::load_csv(stations, routes),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    /// 未设置时使用内置示例网络
    pub dataset: Option<DatasetSource>,
    /// 默认日志过滤规则，RUST_LOG 优先
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            analysis: AnalysisConfig::default(),
            dataset: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let speed = self.analysis.patrol_speed_kmh;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::ConfigError(format!("巡逻速度必须为正数: {}", speed)));
        }
        if self.analysis.max_augmentations == 0 {
            return Err(Error::ConfigError("增广次数上限不能为 0".to_string()));
        }
        Ok(())
    }

    /// 加载配置的数据集，未配置时使用内置网络
    pub fn load_network(&self) -> Result<PatrolNetwork> {
        match &self.dataset {
            Some(source) => source.load(),
            None => PatrolNetwork::builtin(),
        }
    }
}
