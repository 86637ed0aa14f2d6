//! # Bloom Classify
//!
//! 一个基于多模型集成投票的布鲁姆认知层次批量分类应用
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装外部服务调用
//! - `PredictorClient` - 模型预测服务客户端（一次请求全部模型）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条数据
//! - `label_mapper` - 按家族把原始索引换算为布鲁姆层次
//! - `vote_service` - 多数投票裁决（规范顺序平局规则）
//! - `ExtractionService` - 从图片/PDF 文本提取题目
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条文本"的完整分类流程
//! - `ClassifyFlow` - 校验 → 预测 → 组装结果
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量分类处理器，并发与失败隔离
//!
//! ### 对外接口（API）
//! - `api/endpoint` - 分类端点契约（与传输框架解耦）
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::PredictorClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    BatchItemOutcome, BloomLevel, ClassificationResult, ModelFamily, RawPrediction, VoteTally,
};
pub use orchestrator::App;
pub use services::ExtractionService;
pub use workflow::ClassifyFlow;
