/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 预测服务地址
    pub predictor_api_url: String,
    /// 单次预测请求超时（秒）
    pub request_timeout_secs: u64,
    /// 同时发出的预测请求数量上限
    pub max_concurrent_requests: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输入文件路径（每行一道题，或一张待提取的图片）
    pub input_file: String,
    /// 是否将输入文件内容交给 LLM 切分成题目（用于 PDF 提取出的原始文本）
    pub extract_questions: bool,
    // --- 提取 LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predictor_api_url: "http://localhost:8000/predict/".to_string(),
            request_timeout_secs: 30,
            max_concurrent_requests: 8,
            verbose_logging: false,
            input_file: "questions.txt".to_string(),
            extract_questions: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            llm_model_name: "gemini-1.5-flash-002".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            predictor_api_url: std::env::var("CLASSIFIER_API_URL").unwrap_or(default.predictor_api_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            input_file: std::env::var("INPUT_FILE").unwrap_or(default.input_file),
            extract_questions: std::env::var("EXTRACT_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.extract_questions),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
