//! # 数据模型模块
//!
//! 定义采样曲线、函数类型标签、物理参数和运行配置。
//!
//! ## 依赖关系
//! - 被 `transform/`, `parsers/`, `stog/` 使用
//! - 子模块: curve, kinds, params, config

pub mod config;
pub mod curve;
pub mod kinds;
pub mod params;

pub use config::{FileConfig, StogConfig};
pub use curve::Curve;
pub use kinds::{FunctionKind, RealKind, ReciprocalKind};
pub use params::{ScatteringParams, TransformOptions};
