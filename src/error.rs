use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 分类调用错误
    Classification(ClassificationError),
    /// 标签映射错误
    Mapping(MappingError),
    /// 题目提取错误
    Extraction(ExtractionError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Classification(e) => write!(f, "分类错误: {}", e),
            AppError::Mapping(e) => write!(f, "映射错误: {}", e),
            AppError::Extraction(e) => write!(f, "提取错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Classification(e) => Some(e),
            AppError::Mapping(e) => Some(e),
            AppError::Extraction(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 分类调用错误
#[derive(Debug)]
pub enum ClassificationError {
    /// 输入文本为空（去除空白后）
    EmptyInput,
    /// 批处理过滤后没有可用条目
    EmptyBatch,
    /// 对零条预测做投票统计
    EmptyVoteSet,
    /// 预测服务请求失败（网络层）
    RequestFailed {
        text: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 预测服务返回非成功状态码
    BadStatus {
        text: String,
        status: u16,
        message: Option<String>,
    },
    /// 预测服务返回的响应体无法解析
    MalformedResponse {
        text: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 预测服务返回了空的预测集合
    EmptyPredictions {
        text: String,
    },
}

impl fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationError::EmptyInput => write!(f, "输入文本不能为空"),
            ClassificationError::EmptyBatch => write!(f, "批处理中没有可分类的文本"),
            ClassificationError::EmptyVoteSet => write!(f, "预测集合为空，无法投票"),
            ClassificationError::RequestFailed { text, source } => {
                write!(f, "分类请求失败 (文本: {}): {}", text, source)
            }
            ClassificationError::BadStatus {
                text,
                status,
                message,
            } => {
                write!(
                    f,
                    "预测服务返回错误状态 (文本: {}): status={}, message={:?}",
                    text, status, message
                )
            }
            ClassificationError::MalformedResponse { text, source } => {
                write!(f, "预测服务响应解析失败 (文本: {}): {}", text, source)
            }
            ClassificationError::EmptyPredictions { text } => {
                write!(f, "预测服务返回空预测集合 (文本: {})", text)
            }
        }
    }
}

impl std::error::Error for ClassificationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClassificationError::RequestFailed { source, .. }
            | ClassificationError::MalformedResponse { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 标签映射错误
///
/// 表示预测服务与映射表之间的契约不一致，属于配置/数据错误，
/// 不是临时性故障，绝不能静默回退到默认表。
#[derive(Debug)]
pub enum MappingError {
    /// 模型标识不属于任何已知家族
    UnknownModel {
        model: String,
    },
    /// 类别索引超出范围
    IndexOutOfRange {
        model: String,
        index: i64,
    },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::UnknownModel { model } => {
                write!(f, "模型 {} 不属于任何已知家族", model)
            }
            MappingError::IndexOutOfRange { model, index } => {
                write!(f, "模型 {} 的类别索引 {} 超出范围 [0, 5]", model, index)
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// 题目提取错误
#[derive(Debug)]
pub enum ExtractionError {
    /// LLM API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// LLM 返回结果为空
    EmptyResponse {
        model: String,
    },
    /// 输入文件读取失败
    FileReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::ApiCallFailed { model, source } => {
                write!(f, "提取 API 调用失败 (模型: {}): {}", model, source)
            }
            ExtractionError::EmptyResponse { model } => {
                write!(f, "提取 API 返回为空 (模型: {})", model)
            }
            ExtractionError::FileReadFailed { path, source } => {
                write!(f, "读取输入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractionError::ApiCallFailed { source, .. }
            | ExtractionError::FileReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 必需的环境变量不存在
    EnvVarNotFound {
        var_name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "环境变量 {} 不存在", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建分类请求失败错误
    pub fn request_failed(
        text: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Classification(ClassificationError::RequestFailed {
            text: text.into(),
            source: Box::new(source),
        })
    }

    /// 创建响应解析失败错误
    pub fn malformed_response(
        text: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Classification(ClassificationError::MalformedResponse {
            text: text.into(),
            source: Box::new(source),
        })
    }

    /// 创建未知模型错误
    pub fn unknown_model(model: impl Into<String>) -> Self {
        AppError::Mapping(MappingError::UnknownModel {
            model: model.into(),
        })
    }

    /// 创建索引越界错误
    pub fn index_out_of_range(model: impl Into<String>, index: i64) -> Self {
        AppError::Mapping(MappingError::IndexOutOfRange {
            model: model.into(),
            index,
        })
    }

    /// 创建提取 API 失败错误
    pub fn extraction_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Extraction(ExtractionError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
