//! 预测服务客户端
//!
//! 封装所有与模型预测服务的交互。一次请求携带
//! `{"text": ..., "model_type": "all"}`，要求全部模型参与预测；
//! 返回的原始预测不在这里做任何解释，索引换算交给 label_mapper。

use crate::config::Config;
use crate::error::{AppError, AppResult, ClassificationError};
use crate::models::{ClassificationResult, RawPrediction};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// 预测服务响应体
#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: BTreeMap<String, RawPrediction>,
    model_used: String,
}

/// 预测服务客户端
pub struct PredictorClient {
    client: reqwest::Client,
    base_url: String,
}

impl PredictorClient {
    /// 创建新的预测客户端
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.predictor_api_url.clone(),
        }
    }

    /// 分类一条文本
    ///
    /// # 参数
    /// - `text`: 题干内容（调用方保证非空）
    ///
    /// # 返回
    /// 返回包含全部模型原始预测的分类结果
    pub async fn classify(&self, text: &str) -> AppResult<ClassificationResult> {
        let payload = json!({
            "text": text,
            "model_type": "all"
        });

        debug!("请求预测服务: {}", self.base_url);
        debug!("题干长度: {} 字符", text.chars().count());

        let response = self
            .client
            .post(&self.base_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::request_failed(text, e))?;

        let status = response.status();
        if !status.is_success() {
            // 尽量带上服务端的错误说明
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                });

            return Err(AppError::Classification(ClassificationError::BadStatus {
                text: text.to_string(),
                status: status.as_u16(),
                message,
            }));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| AppError::malformed_response(text, e))?;

        if body.predictions.is_empty() {
            return Err(AppError::Classification(
                ClassificationError::EmptyPredictions {
                    text: text.to_string(),
                },
            ));
        }

        debug!("预测完成，{} 个模型参与", body.predictions.len());

        Ok(ClassificationResult {
            text: text.to_string(),
            predictions: body.predictions,
            model_used: body.model_used,
        })
    }
}
