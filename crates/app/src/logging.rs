use sigboard_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, prelude::*};

/// 滚动日志文件名前缀。
const LOG_FILE_PREFIX: &str = "sigboard.log";

/// 构造过滤器：优先使用 `RUST_LOG`，否则回退到配置级别。
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// # Summary
/// 安装全局 tracing 订阅者。
///
/// # Logic
/// 1. 终端输出写入 stderr，stdout 留给看板 JSON。
/// 2. 配置了 `log.dir` 时追加按天滚动的文件输出（非阻塞写入）。
///
/// # Returns
/// 文件输出的 `WorkerGuard`，调用方须持有到进程结束，否则缓冲日志会丢失。
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, TryInitError> {
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter(config))
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter(config))
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
