use crate::models::bloom::BloomLevel;
use phf::phf_map;

/// 模型家族枚举
///
/// 同一家族的模型共用一套"原始索引 → 布鲁姆层次"的顺序表。
/// 关键点：不同家族对同样六个层次使用了不同的索引顺序，
/// 所以查表前必须先确定模型所属的家族，绝不能共用一张表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// 传统机器学习模型
    TraditionalMl,
    /// N-gram 统计模型
    NgramBased,
    /// Transformer 预训练模型
    Transformer,
}

/// 传统 ML / N-gram 家族的层次顺序表（训练时按字母序编码）
const TRADITIONAL_BLOOM_LEVELS: [BloomLevel; 6] = [
    BloomLevel::Analyzing,
    BloomLevel::Applying,
    BloomLevel::Creating,
    BloomLevel::Evaluating,
    BloomLevel::Remembering,
    BloomLevel::Understanding,
];

/// Transformer 家族的层次顺序表（与规范顺序一致）
const TRANSFORMER_BLOOM_LEVELS: [BloomLevel; 6] = [
    BloomLevel::Remembering,
    BloomLevel::Understanding,
    BloomLevel::Applying,
    BloomLevel::Analyzing,
    BloomLevel::Evaluating,
    BloomLevel::Creating,
];

/// 模型标识 → 家族的静态映射表
///
/// 这是固定的模型目录：每个标识属于且仅属于一个家族。
/// 新增模型时在这里登记即可，查表逻辑不需要改动。
static MODEL_FAMILY_TABLE: phf::Map<&'static str, ModelFamily> = phf_map! {
    // 传统机器学习
    "knn" => ModelFamily::TraditionalMl,
    "multinomial_nb" => ModelFamily::TraditionalMl,
    "rf_ngram" => ModelFamily::TraditionalMl,
    "svm_ngram" => ModelFamily::TraditionalMl,
    // N-gram 统计
    "nb_trigram" => ModelFamily::NgramBased,
    "nb_ngram" => ModelFamily::NgramBased,
    "lr_trigram" => ModelFamily::NgramBased,
    "lr_ngram" => ModelFamily::NgramBased,
    // Transformer
    "bert" => ModelFamily::Transformer,
    "distilbert" => ModelFamily::Transformer,
    "roberta" => ModelFamily::Transformer,
};

impl ModelFamily {
    /// 查找模型标识所属的家族
    ///
    /// 未登记的标识返回 None，由调用方决定如何报错。
    pub fn of(model_id: &str) -> Option<Self> {
        MODEL_FAMILY_TABLE.get(model_id).copied()
    }

    /// 获取本家族的层次顺序表
    pub fn label_table(self) -> &'static [BloomLevel; 6] {
        match self {
            ModelFamily::TraditionalMl | ModelFamily::NgramBased => &TRADITIONAL_BLOOM_LEVELS,
            ModelFamily::Transformer => &TRANSFORMER_BLOOM_LEVELS,
        }
    }

    /// 获取家族展示名称
    pub fn name(self) -> &'static str {
        match self {
            ModelFamily::TraditionalMl => "Traditional ML",
            ModelFamily::NgramBased => "N-gram Based",
            ModelFamily::Transformer => "Transformers",
        }
    }

    /// 获取本家族的成员列表（用于结果分组展示）
    pub fn members(self) -> &'static [&'static str] {
        match self {
            ModelFamily::TraditionalMl => &["knn", "multinomial_nb", "rf_ngram", "svm_ngram"],
            ModelFamily::NgramBased => &["nb_trigram", "nb_ngram", "lr_trigram", "lr_ngram"],
            ModelFamily::Transformer => &["bert", "distilbert", "roberta"],
        }
    }

    /// 所有家族（固定展示顺序）
    pub fn all() -> &'static [ModelFamily] {
        &[
            ModelFamily::TraditionalMl,
            ModelFamily::NgramBased,
            ModelFamily::Transformer,
        ]
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_member_belongs_to_its_family() {
        for family in ModelFamily::all() {
            for member in family.members() {
                assert_eq!(ModelFamily::of(member), Some(*family));
            }
        }
    }

    #[test]
    fn test_unknown_model_has_no_family() {
        assert_eq!(ModelFamily::of("gpt4"), None);
        assert_eq!(ModelFamily::of(""), None);
    }

    #[test]
    fn test_family_partition_is_disjoint() {
        let mut seen = std::collections::HashSet::new();
        for family in ModelFamily::all() {
            for member in family.members() {
                assert!(seen.insert(*member), "模型 {} 出现在多个家族中", member);
            }
        }
        assert_eq!(seen.len(), MODEL_FAMILY_TABLE.len());
    }

    #[test]
    fn test_label_tables_cover_all_six_levels() {
        for family in ModelFamily::all() {
            let mut levels: Vec<_> = family.label_table().to_vec();
            levels.sort();
            levels.dedup();
            assert_eq!(levels.len(), 6);
        }
    }
}
