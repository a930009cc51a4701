//! # 解析器模块
//!
//! 读取倒空间数据文件和 JSON 运行配置。
//!
//! ## 依赖关系
//! - 被 `stog/`, `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: columns, config

pub mod columns;
pub mod config;

pub use columns::{parse_columns_content, read_columns};
pub use config::load_config;
