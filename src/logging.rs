//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 初始化全局 tracing 订阅者
///
/// RUST_LOG 存在时优先生效，否则使用 `default_filter`。重复调用无副作用。
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
