//! tracing 日志初始化，输出到stderr以保证stdout只有JSON

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// RUST_LOG 优先于配置中的 log_level，重复初始化时静默忽略
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
