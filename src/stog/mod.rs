//! # StoG 流程模块
//!
//! 多数据集合并、变换、滤波、Lorch 窗与结果导出的完整处理流程。
//!
//! ## 子模块
//! - `merge`: 单文件准备与多数据集合并
//! - `pipeline`: 阶段编排
//! - `export`: 文本格式导出
//! - `plot`: PNG 图表
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `transform/`, `parsers/`, `models/`

pub mod export;
pub mod merge;
pub mod pipeline;
pub mod plot;

pub use pipeline::{StogPipeline, StogResults};
