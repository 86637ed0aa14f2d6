//! 题目提取服务 - 业务能力层
//!
//! 只负责"从图片或 PDF 文本中提取题目"的能力，不关心后续分类流程。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;

/// 图片题目提取的提示词
const IMAGE_EXTRACTION_PROMPT: &str = "\
Please analyze this image and extract any educational questions or assessment items.
Follow these guidelines:
1. Extract complete, well-formed questions only
2. Separate multiple questions into distinct items
3. Preserve the exact wording as shown in the image
4. Include any relevant context or instructions
5. Format each question as a separate array element
6. Ignore incomplete fragments or non-question text

Return the questions in a clear, structured format.";

/// PDF 文本题目提取的提示词
const PDF_EXTRACTION_PROMPT: &str = "\
Please analyze this text extracted from a PDF and extract all educational questions or assessment items.
Follow these guidelines:
1. Extract complete, well-formed questions only
2. Separate multiple questions into distinct items
3. Preserve the exact wording as shown in the text
4. Include any relevant context or instructions
5. Format each question as a separate array element
6. Ignore incomplete fragments or non-question text

Return the questions as an array, with each question as a separate element.";

/// 题目提取服务
///
/// 职责：
/// - 调用 LLM 把图片/PDF 文本切分成独立题目
/// - 输出已分好段的题目列表，交给批处理管线
/// - 不做 OCR，不做版面分析，不关心分类
pub struct ExtractionService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl ExtractionService {
    /// 创建新的提取服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 从图片中提取题目
    ///
    /// # 参数
    /// - `image_data`: 图片原始字节
    /// - `mime_type`: 图片 MIME 类型（如 image/png）
    ///
    /// # 返回
    /// 返回提取出的题目列表（可能为空，表示"未找到题目"）
    pub async fn extract_from_image(
        &self,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<Vec<String>> {
        debug!(
            "图片提取，大小: {} 字节, 类型: {}",
            image_data.len(),
            mime_type
        );

        let data_url = format!("data:{};base64,{}", mime_type, BASE64.encode(image_data));

        let content_parts = vec![
            ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: IMAGE_EXTRACTION_PROMPT.to_string(),
                },
            ),
            ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: data_url,
                        detail: Some(ImageDetail::Auto),
                    },
                },
            ),
        ];

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(
                content_parts,
            ))
            .build()?;

        let response = self
            .send_request(vec![ChatCompletionRequestMessage::User(user_msg)])
            .await?;

        Ok(parse_questions(&response))
    }

    /// 从 PDF 已抽取的原始文本中提取题目
    ///
    /// PDF 的文字抽取（版面解析）由外部协作方完成，这里只接收纯文本。
    pub async fn extract_from_pdf_text(&self, raw_text: &str) -> Result<Vec<String>> {
        debug!("PDF 文本提取，长度: {} 字符", raw_text.chars().count());

        let user_message = format!("{}\n\n{}", PDF_EXTRACTION_PROMPT, raw_text);

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;

        let response = self
            .send_request(vec![ChatCompletionRequestMessage::User(user_msg)])
            .await?;

        Ok(parse_questions(&response))
    }

    /// 发送聊天请求并取回文本内容
    async fn send_request(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String> {
        debug!("调用提取 LLM，模型: {}", self.model_name);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.3)
            .max_tokens(2048u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("提取 LLM 调用失败: {}", e);
            anyhow::anyhow!("提取 LLM 调用失败: {}", e)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("提取 LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}

/// 把 LLM 的回复整理成题目列表
///
/// 按行切分、去空白、过滤过短的行、去掉行首编号。
fn parse_questions(response: &str) -> Vec<String> {
    let mut questions: Vec<String> = response
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| line.chars().count() > 10)
        .collect();

    // 去掉 "1. " / "2) " 之类的行首编号
    if let Ok(re) = Regex::new(r"^\d+[).\s]+") {
        questions = questions
            .into_iter()
            .map(|q| re.replace(&q, "").to_string())
            .collect();
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_strips_numbering() {
        let response = "1. What is the capital of France?\n2) Explain how photosynthesis works.";
        let questions = parse_questions(response);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0], "What is the capital of France?");
        assert_eq!(questions[1], "Explain how photosynthesis works.");
    }

    #[test]
    fn test_parse_questions_filters_short_lines() {
        let response = "Questions:\n\nok\nWhat is the speed of light in a vacuum?";
        let questions = parse_questions(response);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0], "What is the speed of light in a vacuum?");
    }

    #[test]
    fn test_parse_questions_empty_response() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("\n\n  \n").is_empty());
    }

    /// 测试真实提取接口的连通性
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_extract_from_pdf_text_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_extract_from_pdf_text_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = ExtractionService::new(&config);

        let raw_text = "Chapter 3 Review\n\
            1. Define the term 'ecosystem' and give two examples.\n\
            2. Compare and contrast mitosis and meiosis.\n\
            Page 42";

        let result = service.extract_from_pdf_text(raw_text).await;

        match result {
            Ok(questions) => {
                println!("\n========== 提取结果 ==========");
                for (i, q) in questions.iter().enumerate() {
                    println!("{}. {}", i + 1, q);
                }
                println!("==============================\n");
                assert!(!questions.is_empty());
            }
            Err(e) => {
                println!("❌ 提取调用失败: {}", e);
                panic!("测试失败: {}", e);
            }
        }
    }
}
