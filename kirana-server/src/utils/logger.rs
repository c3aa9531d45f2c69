//! 日志初始化
//!
//! 两种模式：
//! - 纯控制台输出（开发环境）
//! - 控制台 + 按天滚动的 JSON 文件（设置 `LOG_DIR` 时）
//!
//! 过滤规则优先取 `RUST_LOG`，否则使用传入的级别（默认 `info`）。

use tracing_subscriber::EnvFilter;

fn build_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")))
}

/// 初始化控制台日志
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(None))
        .with_target(true)
        .init();
}

/// 初始化日志，可选输出到滚动文件
///
/// `dir` 为 `None` 时等同于 [`init_logger`]。
pub fn init_logger_with_file(level: Option<&str>, dir: Option<&str>) {
    match dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "kirana-server.log");
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(level))
                .with_writer(file_appender)
                .with_ansi(false)
                .json()
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(level))
                .with_target(true)
                .init();
        }
    }
}
