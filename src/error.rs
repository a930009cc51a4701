//! # 统一错误处理模块
//!
//! 定义 StoG 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 配置错误：缺失或非法的物理参数
//! - 定义域错误：长度不一致、非递增、裁剪后为空、Q=0 / r=0 处除零
//! - 未知函数类型
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// StoG 统一错误类型
#[derive(Error, Debug)]
pub enum StogError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {path} at line {line}\nReason: {reason}")]
    ParseError {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Failed to parse JSON configuration: {path}")]
    ConfigParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ─────────────────────────────────────────────────────────────
    // 定义域错误
    // ─────────────────────────────────────────────────────────────
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Domain error: x has {x_len} points but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Domain error: x is not strictly increasing at index {index}")]
    NotIncreasing { index: usize },

    #[error("Empty range after cropping to [{min}, {max}]")]
    EmptyRange { min: f64, max: f64 },

    #[error("Division by zero: {axis} = 0 at index {index}")]
    DivideByZero { axis: &'static str, index: usize },

    // ─────────────────────────────────────────────────────────────
    // 函数类型错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown function kind: '{0}'")]
    UnknownFunctionKind(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl StogError {
    /// 是否属于定义域错误
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            StogError::Domain(_)
                | StogError::LengthMismatch { .. }
                | StogError::NotIncreasing { .. }
                | StogError::EmptyRange { .. }
                | StogError::DivideByZero { .. }
        )
    }

    /// 是否属于配置错误
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, StogError::Configuration(_))
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, StogError>;
