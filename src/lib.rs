//! # Question Paper Gen
//!
//! 基于试卷结构模式的大学试卷解析与生成工具
//!
//! ## 架构设计
//!
//! 本系统分为四层：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `pdf_service` - PDF 文本提取能力
//! - `LlmService` - 生成模型调用能力
//!
//! ### ② 核心解析层（Parser / Pattern）
//! - `parser/segmenter` - 多试卷行流切分
//! - `parser/units` - 单元/套题/OR/题目边界状态机
//! - `pattern/aggregator` - 分值模式聚合
//! - `pattern/store` - 模式模型持久化与查找
//!
//! ### ③ 流程层（Processing / Generator）
//! - `processing` - 数据集解析与模型训练流程
//! - `generator` - 模式约束下的试卷生成流程
//!
//! ### ④ 编排层（App / Cli）
//! - `app` - 子命令分发、启动与收尾日志
//! - `cli` - 命令行定义
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod parser;
pub mod pattern;
pub mod processing;
pub mod services;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GeneratedPaper, PaperUnits, Question, RawPaper, SubjectUnits};
pub use parser::{parse_units, segment, UnitSetParser};
pub use pattern::{aggregate, PatternStore};
