//! 标签映射 - 业务能力层
//!
//! 把 (模型标识, 原始类别索引) 换算为统一的布鲁姆层次。
//!
//! 不同家族在训练时对同样六个层次采用了不同的索引顺序，
//! 所以这里必须先按模型查家族、再查家族自己的顺序表。
//! 查不到家族或索引越界都是契约错误，直接报 MappingError，
//! 绝不静默回退到某张默认表。

use crate::error::{AppError, AppResult};
use crate::models::{BloomLevel, ModelFamily};

/// 将一个模型的原始类别索引换算为布鲁姆层次
///
/// 纯函数：只依赖静态家族表，同样的输入永远得到同样的输出。
///
/// # 参数
/// - `model_id`: 模型标识（必须属于已知家族）
/// - `index`: 原始类别索引（必须在 [0, 5] 内）
pub fn label_for(model_id: &str, index: i64) -> AppResult<BloomLevel> {
    let family =
        ModelFamily::of(model_id).ok_or_else(|| AppError::unknown_model(model_id))?;

    if !(0..6).contains(&index) {
        return Err(AppError::index_out_of_range(model_id, index));
    }

    Ok(family.label_table()[index as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traditional_family_index_order() {
        // 传统 ML 家族按字母序编码
        assert_eq!(label_for("knn", 0).unwrap(), BloomLevel::Analyzing);
        assert_eq!(label_for("knn", 4).unwrap(), BloomLevel::Remembering);
        assert_eq!(label_for("svm_ngram", 5).unwrap(), BloomLevel::Understanding);
    }

    #[test]
    fn test_ngram_family_shares_traditional_order() {
        assert_eq!(label_for("nb_trigram", 0).unwrap(), BloomLevel::Analyzing);
        assert_eq!(label_for("lr_ngram", 2).unwrap(), BloomLevel::Creating);
    }

    #[test]
    fn test_transformer_family_uses_canonical_order() {
        assert_eq!(label_for("bert", 0).unwrap(), BloomLevel::Remembering);
        assert_eq!(label_for("distilbert", 1).unwrap(), BloomLevel::Understanding);
        assert_eq!(label_for("roberta", 5).unwrap(), BloomLevel::Creating);
    }

    #[test]
    fn test_same_index_differs_across_families() {
        // 核心陷阱：同一个索引在不同家族代表不同层次
        assert_ne!(
            label_for("knn", 0).unwrap(),
            label_for("bert", 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let err = label_for("gpt4", 0).unwrap_err();
        assert!(err.to_string().contains("gpt4"));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        assert!(label_for("bert", 6).is_err());
        assert!(label_for("bert", -1).is_err());
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for _ in 0..10 {
            assert_eq!(label_for("rf_ngram", 3).unwrap(), BloomLevel::Evaluating);
        }
    }

    #[test]
    fn test_all_valid_pairs_yield_canonical_labels() {
        for family in ModelFamily::all() {
            for member in family.members() {
                for index in 0..6 {
                    let level = label_for(member, index).unwrap();
                    assert!(crate::models::CANONICAL_LEVELS.contains(&level));
                }
            }
        }
    }
}
