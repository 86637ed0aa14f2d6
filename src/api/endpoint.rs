//! 分类端点 - API 模块
//!
//! 与传输框架无关的分类端点：定义请求/响应/错误的载荷形态和
//! 状态码归类，由外部的 HTTP 框架负责挂载。
//!
//! 约定：
//! - 缺少或空白的 text → 400 + 错误消息
//! - 下游预测失败 → 500 + 通用消息（细节只进日志，不外泄）
//! - 成功 → 200 + `{ "results": [分类结果] }`

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::ClassificationResult;
use crate::workflow::ClassifyFlow;

/// 分类请求体
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: Option<String>,
}

/// 分类成功响应体
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub results: Vec<ClassificationResult>,
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// 端点处理结果（带等价 HTTP 状态码）
#[derive(Debug)]
pub enum EndpointReply {
    /// 200
    Ok(ClassifyResponse),
    /// 400
    BadRequest(ErrorResponse),
    /// 500
    ServerError(ErrorResponse),
}

impl EndpointReply {
    /// 等价的 HTTP 状态码
    pub fn status(&self) -> u16 {
        match self {
            EndpointReply::Ok(_) => 200,
            EndpointReply::BadRequest(_) => 400,
            EndpointReply::ServerError(_) => 500,
        }
    }
}

/// 处理一次分类请求
pub async fn handle_classify(flow: &ClassifyFlow, request: ClassifyRequest) -> EndpointReply {
    let text = match request.text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => {
            return EndpointReply::BadRequest(ErrorResponse {
                message: "No text provided".to_string(),
            });
        }
    };

    match flow.run(text, 1).await {
        Ok(result) => EndpointReply::Ok(ClassifyResponse {
            results: vec![result],
        }),
        Err(e) => {
            error!("分类端点处理失败: {}", e);
            EndpointReply::ServerError(ErrorResponse {
                message: "Failed to process classification".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_flow() -> ClassifyFlow {
        let config = Config {
            predictor_api_url: "http://127.0.0.1:1/predict/".to_string(),
            ..Config::default()
        };
        ClassifyFlow::new(&config)
    }

    #[test]
    fn test_missing_text_is_bad_request() {
        let flow = test_flow();
        let reply = tokio_test::block_on(handle_classify(&flow, ClassifyRequest { text: None }));

        assert_eq!(reply.status(), 400);
        match reply {
            EndpointReply::BadRequest(body) => assert_eq!(body.message, "No text provided"),
            other => panic!("预期 400，实际: {:?}", other),
        }
    }

    #[test]
    fn test_blank_text_is_bad_request() {
        let flow = test_flow();
        let request = ClassifyRequest {
            text: Some("   ".to_string()),
        };
        let reply = tokio_test::block_on(handle_classify(&flow, request));

        assert_eq!(reply.status(), 400);
    }

    #[test]
    fn test_downstream_failure_is_server_error() {
        let flow = test_flow();
        let request = ClassifyRequest {
            text: Some("What is 2+2?".to_string()),
        };
        let reply = tokio_test::block_on(handle_classify(&flow, request));

        assert_eq!(reply.status(), 500);
        match reply {
            EndpointReply::ServerError(body) => {
                assert_eq!(body.message, "Failed to process classification")
            }
            other => panic!("预期 500，实际: {:?}", other),
        }
    }
}
