//! 单条文本分类流程 - 流程层
//!
//! 核心职责：定义"一条文本"的完整分类流程
//!
//! 流程顺序：
//! 1. 校验输入非空 → 2. 调用预测服务 → 3. 组装结果（记录投票裁决日志）
//!
//! 本层不做重试（重试策略属于传输层协作方），也不把原始预测
//! 换算成层次存起来：原始数据与推导结果解耦，换算由消费方按需进行。

use tracing::{debug, info, warn};

use crate::clients::PredictorClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, ClassificationError};
use crate::models::ClassificationResult;
use crate::services::vote_service;
use crate::utils::logging::truncate_text;

/// 单条文本分类流程
///
/// - 只处理单条文本
/// - 不出现 Vec<String>（批处理在编排层）
/// - 不持有任何批处理状态
pub struct ClassifyFlow {
    predictor: PredictorClient,
    verbose_logging: bool,
}

impl ClassifyFlow {
    /// 创建新的分类流程
    pub fn new(config: &Config) -> Self {
        Self {
            predictor: PredictorClient::new(config),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 分类一条文本
    ///
    /// # 参数
    /// - `text`: 题干内容
    /// - `item_index`: 在当前批次中的序号（从 1 开始，仅用于日志）
    ///
    /// # 返回
    /// 返回包含全部模型原始预测的分类结果
    pub async fn run(&self, text: &str, item_index: usize) -> AppResult<ClassificationResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::Classification(ClassificationError::EmptyInput));
        }

        info!("[题目 {}] 题干: {}", item_index, truncate_text(trimmed, 80));

        let result = self.predictor.classify(trimmed).await?;

        info!(
            "[题目 {}] ✓ 分类完成，{} 个模型参与",
            item_index,
            result.predictions.len()
        );

        // 投票裁决仅用于日志观测，结果里只保留原始预测
        match vote_service::aggregate(&result.predictions) {
            Ok(tally) => {
                info!(
                    "[题目 {}] 🏆 多数裁决: {} ({}/{} 票)",
                    item_index, tally.level, tally.vote_count, tally.total_votes
                );
            }
            Err(e) => {
                warn!("[题目 {}] ⚠️ 投票裁决失败: {}", item_index, e);
            }
        }

        if self.verbose_logging {
            for (model, raw) in &result.predictions {
                debug!(
                    "[题目 {}]   {} → 索引 {} (置信度 {:.1}%)",
                    item_index,
                    model,
                    raw.prediction,
                    raw.probability * 100.0
                );
            }
        }

        Ok(result)
    }
}
