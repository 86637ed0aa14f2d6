//! 批量分类处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量题目的分类和结果汇总。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建分类流程和提取服务
//! 2. **题目加载**：从文本文件逐行读取，或经提取服务从图片/PDF 文本切分
//! 3. **并发控制**：使用 Semaphore 限制同时在途的预测请求数
//! 4. **失败隔离**：单条题目失败只记入自己的槽位，绝不拖垮同批其他题目
//! 5. **顺序保证**：输出顺序 = 输入顺序，与各请求的完成先后无关
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单条文本的细节，向下委托 ClassifyFlow
//! - **协作式并发**：join_all 在单任务内并发等待，各条目写入自己的槽位，
//!   没有跨条目的共享可变状态，也就不需要加锁
//! - **整体返回**：所有条目都落定之后才返回完整的结果序列

use crate::config::Config;
use crate::error::{AppError, AppResult, ClassificationError};
use crate::models::BatchItemOutcome;
use crate::services::ExtractionService;
use crate::utils::logging;
use crate::workflow::ClassifyFlow;
use anyhow::{Context, Result};
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// 应用主结构
pub struct App {
    config: Config,
    flow: ClassifyFlow,
    extractor: ExtractionService,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config.predictor_api_url, config.max_concurrent_requests);

        Self {
            flow: ClassifyFlow::new(&config),
            extractor: ExtractionService::new(&config),
            config,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待分类的题目
        let questions = self.load_questions().await?;

        logging::log_questions_loaded(questions.len(), &self.config.input_file);

        // 批量分类
        let outcomes = self
            .classify_batch(&questions)
            .await
            .context("批量分类失败")?;

        // 渲染每条结果
        for (i, outcome) in outcomes.iter().enumerate() {
            logging::log_outcome(i + 1, outcome);
        }

        // 输出最终统计
        let success = outcomes.iter().filter(|o| o.is_success()).count();
        logging::print_final_stats(success, outcomes.len() - success, outcomes.len());

        Ok(())
    }

    /// 批量分类一组文本
    ///
    /// 契约：
    /// - 空白条目先被过滤；过滤后一条不剩 → EmptyBatch
    /// - 所有条目并发分类，单条失败记入该条的 error 槽位
    /// - 返回序列与过滤后的输入序列逐位对应
    pub async fn classify_batch(&self, texts: &[String]) -> AppResult<Vec<BatchItemOutcome>> {
        let usable: Vec<String> = texts
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if usable.is_empty() {
            return Err(AppError::Classification(ClassificationError::EmptyBatch));
        }

        info!("📦 开始批量分类，共 {} 条", usable.len());

        let semaphore = Semaphore::new(self.config.max_concurrent_requests);

        let item_futures = usable.iter().enumerate().map(|(idx, text)| {
            let item_index = idx + 1;
            let semaphore = &semaphore;
            async move {
                // 信号量在本函数栈上存活，不会被关闭
                let _permit = semaphore.acquire().await.ok();

                match self.flow.run(text, item_index).await {
                    Ok(result) => BatchItemOutcome::success(text.clone(), result),
                    Err(e) => {
                        error!("[题目 {}] ❌ 分类失败: {}", item_index, e);
                        BatchItemOutcome::failure(text.clone(), e.to_string())
                    }
                }
            }
        });

        // join_all 按构造顺序收集结果，与完成先后无关
        let outcomes = join_all(item_futures).await;

        let success = outcomes.iter().filter(|o| o.is_success()).count();
        info!("✓ 批量分类完成: 成功 {}/{}", success, outcomes.len());

        Ok(outcomes)
    }

    /// 加载待分类的题目
    ///
    /// - 图片文件 → 提取服务切分题目
    /// - 开启 extract_questions → 文件内容（如 PDF 抽取的原始文本）交给提取服务
    /// - 其他情况 → 每行一道题
    async fn load_questions(&self) -> Result<Vec<String>> {
        let path = &self.config.input_file;
        info!("\n📁 正在加载输入: {}", path);

        if let Some(mime_type) = image_mime_type(path) {
            info!("🖼️ 检测到图片输入，调用提取服务切分题目...");
            let image_data = tokio::fs::read(path)
                .await
                .with_context(|| format!("读取图片失败: {}", path))?;
            return self.extractor.extract_from_image(&image_data, mime_type).await;
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("读取输入文件失败: {}", path))?;

        if self.config.extract_questions {
            info!("📑 提取模式：将文件内容交给 LLM 切分题目...");
            return self.extractor.extract_from_pdf_text(&content).await;
        }

        Ok(content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }
}

/// 根据扩展名判断图片 MIME 类型
fn image_mime_type(path: &str) -> Option<&'static str> {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())?
        .to_lowercase();

    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        // 指向保留端口，保证测试不会真的联网成功
        let config = Config {
            predictor_api_url: "http://127.0.0.1:1/predict/".to_string(),
            ..Config::default()
        };
        App::initialize(config)
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let app = test_app();
        let err = app.classify_batch(&[]).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Classification(ClassificationError::EmptyBatch)
        ));
    }

    #[tokio::test]
    async fn test_all_blank_batch_rejected() {
        let app = test_app();
        let texts = vec!["".to_string(), "   ".to_string(), "\t\n".to_string()];
        let err = app.classify_batch(&texts).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Classification(ClassificationError::EmptyBatch)
        ));
    }

    #[tokio::test]
    async fn test_blank_entries_filtered_before_classification() {
        let app = test_app();
        let texts = vec![
            "".to_string(),
            "  ".to_string(),
            "What is 2+2?".to_string(),
        ];

        // 预测服务不可达：唯一的非空条目会得到失败槽位，但不会触发 EmptyBatch
        let outcomes = app.classify_batch(&texts).await.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].source_text, "What is 2+2?");
        assert!(outcomes[0].error.is_some());
    }

    #[test]
    fn test_image_mime_type_detection() {
        assert_eq!(image_mime_type("scan.png"), Some("image/png"));
        assert_eq!(image_mime_type("photo.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime_type("questions.txt"), None);
        assert_eq!(image_mime_type("no_extension"), None);
    }
}
