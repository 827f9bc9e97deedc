//! 日志初始化
//!
//! 日志统一输出到 stderr，stdout 保持为空。默认只输出警告，
//! 调试信息需通过 `RUST_LOG` 打开，差异报告不经过日志。

use std::io::IsTerminal;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// 默认日志级别，可通过 `RUST_LOG` 覆盖
const DEFAULT_DIRECTIVE: &str = "warn";

static INIT_ONCE: Once = Once::new();

/// 初始化日志，多次调用只有第一次生效
pub fn init() {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // 测试中可能已有全局 subscriber，忽略重复设置
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .without_time()
            .try_init();
    });
}
