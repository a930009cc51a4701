//! # 变换模块
//!
//! 倒空间与实空间函数之间的正弦 Fourier 变换、逐点代数转换、
//! 24 个具名转换和 Fourier 滤波。
//!
//! ## 子模块
//! - `converter`: 同一空间内的仿射关系
//! - `transformer`: 正弦核、定义域工具、缺失区间修正
//! - `matrix`: 规范形式枢轴与具名转换
//! - `filter`: 低 r 伪影滤除
//!
//! ## 依赖关系
//! - 被 `stog/`, `commands/` 使用
//! - 使用 `models/`

pub mod converter;
pub mod filter;
pub mod matrix;
pub mod transformer;

pub use filter::{FilterOutput, FourierFilter};
pub use transformer::{
    apply_cropping, extend_axis_to_low_end, fourier_transform, linspace, low_end_points,
    low_x_correction, Transformer,
};
