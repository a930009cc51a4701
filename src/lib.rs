//! # StoG
//!
//! 全散射数据的倒空间 ↔ 实空间变换库。
//!
//! ## 模块结构
//! - `error`: 统一错误类型
//! - `models`: 曲线、函数类型、物理参数、运行配置
//! - `transform`: 正弦 Fourier 变换、转换矩阵、Fourier 滤波
//! - `parsers`: 数据文件与 JSON 配置读取
//! - `stog`: 合并、变换、滤波、导出的完整流程

pub mod error;
pub mod models;
pub mod parsers;
pub mod stog;
pub mod transform;

pub use error::{Result, StogError};
pub use models::{Curve, FunctionKind, RealKind, ReciprocalKind, ScatteringParams, TransformOptions};
pub use transform::{FilterOutput, FourierFilter, Transformer};
