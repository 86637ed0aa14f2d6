//! 日志工具模块
//!
//! 提供日志初始化、结果渲染和输出的辅助函数

use crate::models::{BatchItemOutcome, ModelFamily};
use crate::services::{label_mapper, vote_service};
use tracing::{info, warn};

/// 初始化 tracing 日志订阅器
///
/// 通过 RUST_LOG 环境变量控制级别，默认 info。
/// 重复调用安全（测试中会多次初始化）。
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(predictor_api_url: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 布鲁姆层次批量分类模式");
    info!("🔗 预测服务: {}", predictor_api_url);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录题目加载信息
pub fn log_questions_loaded(total: usize, source: &str) {
    info!("✓ 从 {} 加载了 {} 道题目", source, total);
    info!("💡 全部题目将并发分类，单题失败不影响其余题目\n");
}

/// 渲染单条题目的分类结果
///
/// 先打印多数裁决，再按家族分组打印各模型的层次与置信度。
pub fn log_outcome(index: usize, outcome: &BatchItemOutcome) {
    info!("\n{}", "─".repeat(60));
    info!("📄 题目 {}: {}", index, truncate_text(&outcome.source_text, 80));

    let result = match &outcome.result {
        Some(result) => result,
        None => {
            warn!(
                "❌ 分类失败: {}",
                outcome.error.as_deref().unwrap_or("未知错误")
            );
            return;
        }
    };

    match vote_service::aggregate(&result.predictions) {
        Ok(tally) => {
            info!(
                "🏆 最终分类 (投票): {} ({}/{} 票)",
                tally.level, tally.vote_count, tally.total_votes
            );
        }
        Err(e) => {
            warn!("⚠️ 无法得出多数裁决: {}", e);
        }
    }

    for family in ModelFamily::all() {
        info!("  [{}]", family.name());
        for member in family.members() {
            if let Some(raw) = result.predictions.get(*member) {
                match label_mapper::label_for(member, raw.prediction) {
                    Ok(level) => {
                        info!(
                            "    {} → {} (置信度 {:.1}%)",
                            member,
                            level,
                            raw.probability * 100.0
                        );
                    }
                    Err(e) => {
                        warn!("    {} → 无法映射: {}", member, e);
                    }
                }
            }
        }
    }
}

/// 打印最终统计信息
pub fn print_final_stats(success: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部分类完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
