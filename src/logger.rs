//! 日志初始化
//!
//! 所有日志输出到 stderr：stdout 保留给 generate 命令的 JSON 结果

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 日志级别通过 RUST_LOG 环境变量控制，默认 info
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
