//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::SessionReport;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 数字卡片答题模式");
    info!(
        "⏱️ 防抖延迟: {}ms / 下一题延迟: {}ms",
        config.debounce_ms, config.next_question_delay_ms
    );
    match config.rng_seed {
        Some(seed) => info!("🎲 随机种子: {}", seed),
        None => info!("🎲 随机种子: 系统熵源"),
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &SessionReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 答题统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🖼️ 处理帧数: {}", report.frames);
    info!("📝 出题数: {}", report.stats.questions_asked);
    info!("✅ 答对数: {}", report.stats.correct_answers);
    info!("🗑️ 丢弃过期回调: {}", report.stats.stale_callbacks);
    info!("{}", "=".repeat(60));
}
