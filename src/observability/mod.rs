//! 可观测性模块
//!
//! 初始化结构化日志。日志写到标准错误或滚动文件，标准输出只留给页面数据。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;

/// 日志文件名前缀
pub const LOG_FILE_PREFIX: &str = "mensa.log";

/// 初始化全局日志
///
/// `RUST_LOG` 优先于配置中的级别。返回的 guard 需要保持到进程结束，
/// 否则文件日志可能丢失尾部内容。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    let result = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    // Already initialized (tests, embedding binaries): keep the existing subscriber
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already set");
    }

    guard
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
