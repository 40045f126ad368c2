//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("站点不存在: {0}")]
    UnknownStation(String),

    #[error("站点已存在: {0}")]
    DuplicateStation(String),

    #[error("无效的巡逻路线: {0}")]
    InvalidRoute(String),

    #[error("未知算法: {0}")]
    UnknownAlgorithm(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("服务器错误: {0}")]
    ServerError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}
