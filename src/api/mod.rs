//! API 模块
//!
//! 定义对外暴露的分类端点契约（与具体 HTTP 框架解耦）

pub mod endpoint;

pub use endpoint::{handle_classify, ClassifyRequest, ClassifyResponse, EndpointReply, ErrorResponse};
