use crate::models::bloom::BloomLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个模型对单条文本的原始预测
///
/// 线上接口返回的原始形态：`prediction` 是模型自己编码空间里的
/// 类别索引（0-5），`probability` 是对应的置信度。
/// 索引到布鲁姆层次的换算由 label_mapper 按家族完成，这里不做解释。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrediction {
    /// 原始类别索引（有符号，越界值留给映射层报错而不是反序列化失败）
    pub prediction: i64,
    /// 置信度 [0,1]
    pub probability: f64,
}

/// 单条文本的分类结果
///
/// 创建后不再修改。`predictions` 可能只覆盖模型目录的一个非空子集
/// （个别模型未响应时）。使用 BTreeMap 保证遍历顺序稳定。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 原始输入文本
    pub text: String,
    /// 模型标识 → 原始预测
    pub predictions: BTreeMap<String, RawPrediction>,
    /// 预测服务返回的模型说明
    pub model_used: String,
}

/// 投票统计结果（按需推导，不落盘）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoteTally {
    /// 得票最多的层次（平局时取规范顺序靠前者）
    pub level: BloomLevel,
    /// 胜出层次的得票数
    pub vote_count: usize,
    /// 参与投票的模型总数
    pub total_votes: usize,
}

/// 批处理中单条文本的处理结果
///
/// `result` 与 `error` 恰好一个非空，只能通过构造函数创建。
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemOutcome {
    /// 原始输入文本
    pub source_text: String,
    /// 分类成功时的结果
    pub result: Option<ClassificationResult>,
    /// 分类失败时的错误描述
    pub error: Option<String>,
}

impl BatchItemOutcome {
    /// 创建成功结果
    pub fn success(source_text: impl Into<String>, result: ClassificationResult) -> Self {
        Self {
            source_text: source_text.into(),
            result: Some(result),
            error: None,
        }
    }

    /// 创建失败结果
    pub fn failure(source_text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            result: None,
            error: Some(error.into()),
        }
    }

    /// 是否成功
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}
