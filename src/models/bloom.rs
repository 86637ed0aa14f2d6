/// 布鲁姆认知层次枚举
///
/// 六个层次按认知要求从低到高排列，这个声明顺序就是规范顺序：
/// 投票平局时总是选择规范顺序中靠前的层次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum BloomLevel {
    /// 记忆
    Remembering,
    /// 理解
    Understanding,
    /// 应用
    Applying,
    /// 分析
    Analyzing,
    /// 评价
    Evaluating,
    /// 创造
    Creating,
}

/// 规范顺序的层次表（平局裁决顺序）
pub const CANONICAL_LEVELS: [BloomLevel; 6] = [
    BloomLevel::Remembering,
    BloomLevel::Understanding,
    BloomLevel::Applying,
    BloomLevel::Analyzing,
    BloomLevel::Evaluating,
    BloomLevel::Creating,
];

impl BloomLevel {
    /// 获取规范顺序中的序号（0-5）
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// 从规范序号解析层次
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        CANONICAL_LEVELS.get(ordinal).copied()
    }

    /// 获取标准名称（所有模型共用的输出词表）
    pub fn name(self) -> &'static str {
        match self {
            BloomLevel::Remembering => "Remembering",
            BloomLevel::Understanding => "Understanding",
            BloomLevel::Applying => "Applying",
            BloomLevel::Analyzing => "Analyzing",
            BloomLevel::Evaluating => "Evaluating",
            BloomLevel::Creating => "Creating",
        }
    }

    /// 获取中文名称（仅用于日志展示）
    pub fn name_cn(self) -> &'static str {
        match self {
            BloomLevel::Remembering => "记忆",
            BloomLevel::Understanding => "理解",
            BloomLevel::Applying => "应用",
            BloomLevel::Analyzing => "分析",
            BloomLevel::Evaluating => "评价",
            BloomLevel::Creating => "创造",
        }
    }

    /// 尝试从标准名称解析层次（精确匹配）
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Remembering" => Some(BloomLevel::Remembering),
            "Understanding" => Some(BloomLevel::Understanding),
            "Applying" => Some(BloomLevel::Applying),
            "Analyzing" => Some(BloomLevel::Analyzing),
            "Evaluating" => Some(BloomLevel::Evaluating),
            "Creating" => Some(BloomLevel::Creating),
            _ => None,
        }
    }
}

impl std::fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
