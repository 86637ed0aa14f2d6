//! 投票统计 - 业务能力层
//!
//! 把一条文本的全部模型预测汇总成单一的多数裁决。
//!
//! 平局规则：得票相同时取规范顺序（CANONICAL_LEVELS 的声明顺序）中
//! 靠前的层次，保证任何平台、任何遍历顺序下结果一致。

use crate::error::{AppError, AppResult, ClassificationError};
use crate::models::{RawPrediction, VoteTally, CANONICAL_LEVELS};
use crate::services::label_mapper;
use std::collections::BTreeMap;
use tracing::warn;

/// 汇总一组模型预测，返回多数裁决
///
/// - 输入为空 → EmptyVoteSet
/// - 个别预测无法映射 → 丢弃该票并告警，其余照常统计
///   （total_votes 仍等于输入条目数，保证集成投票在部分覆盖下有意义）
/// - 没有任何一票能映射 → 返回映射错误
pub fn aggregate(predictions: &BTreeMap<String, RawPrediction>) -> AppResult<VoteTally> {
    if predictions.is_empty() {
        return Err(AppError::Classification(ClassificationError::EmptyVoteSet));
    }

    // 六个计数槽，按规范序号索引
    let mut counts = [0usize; 6];
    let mut first_mapping_error = None;

    for (model, raw) in predictions {
        match label_mapper::label_for(model, raw.prediction) {
            Ok(level) => counts[level.ordinal()] += 1,
            Err(e) => {
                warn!("丢弃无法映射的预测 (模型: {}): {}", model, e);
                if first_mapping_error.is_none() {
                    first_mapping_error = Some(e);
                }
            }
        }
    }

    let max_votes = counts.iter().copied().max().unwrap_or(0);
    if max_votes == 0 {
        // 一票都没映射成功，契约彻底不匹配
        return Err(first_mapping_error
            .unwrap_or(AppError::Classification(ClassificationError::EmptyVoteSet)));
    }

    // 规范顺序遍历：第一个达到最高票的层次胜出
    let level = CANONICAL_LEVELS
        .iter()
        .copied()
        .find(|l| counts[l.ordinal()] == max_votes)
        .unwrap_or(CANONICAL_LEVELS[0]);

    Ok(VoteTally {
        level,
        vote_count: max_votes,
        total_votes: predictions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BloomLevel;

    fn predictions(entries: &[(&str, i64)]) -> BTreeMap<String, RawPrediction> {
        entries
            .iter()
            .map(|(model, index)| {
                (
                    model.to_string(),
                    RawPrediction {
                        prediction: *index,
                        probability: 0.9,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_cross_family_agreement() {
        // bert/distilbert 的索引 0 和 knn 的索引 4 都指向 Remembering
        let preds = predictions(&[("bert", 0), ("distilbert", 0), ("knn", 4)]);

        let tally = aggregate(&preds).unwrap();
        assert_eq!(tally.level, BloomLevel::Remembering);
        assert_eq!(tally.vote_count, 3);
        assert_eq!(tally.total_votes, 3);
    }

    #[test]
    fn test_tie_breaks_to_earlier_canonical_level() {
        // Creating 两票（bert:5, knn:2），Remembering 两票（roberta:0, distilbert:0）
        let preds = predictions(&[("bert", 5), ("knn", 2), ("roberta", 0), ("distilbert", 0)]);

        // 平局必须裁给规范顺序靠前的 Remembering，且每次都一样
        for _ in 0..20 {
            let tally = aggregate(&preds).unwrap();
            assert_eq!(tally.level, BloomLevel::Remembering);
            assert_eq!(tally.vote_count, 2);
            assert_eq!(tally.total_votes, 4);
        }
    }

    #[test]
    fn test_empty_predictions_rejected() {
        let preds = BTreeMap::new();
        let err = aggregate(&preds).unwrap_err();
        assert!(matches!(
            err,
            AppError::Classification(ClassificationError::EmptyVoteSet)
        ));
    }

    #[test]
    fn test_unmappable_vote_is_dropped_not_fatal() {
        let preds = predictions(&[("bert", 0), ("mystery_model", 0)]);

        let tally = aggregate(&preds).unwrap();
        assert_eq!(tally.level, BloomLevel::Remembering);
        assert_eq!(tally.vote_count, 1);
        // total_votes 仍按输入条目数计
        assert_eq!(tally.total_votes, 2);
    }

    #[test]
    fn test_all_votes_unmappable_is_error() {
        let preds = predictions(&[("mystery_a", 0), ("mystery_b", 1)]);
        assert!(aggregate(&preds).is_err());
    }

    #[test]
    fn test_vote_count_never_exceeds_total() {
        let preds = predictions(&[
            ("bert", 2),
            ("roberta", 2),
            ("distilbert", 3),
            ("knn", 1),
            ("nb_ngram", 1),
        ]);

        let tally = aggregate(&preds).unwrap();
        assert!(tally.vote_count > 0);
        assert!(tally.vote_count <= tally.total_votes);
        assert_eq!(tally.total_votes, 5);
    }
}
