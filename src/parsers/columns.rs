//! # 列数据文件解析器
//!
//! 读取文本格式的 `(X, Y)` 两列数据。
//!
//! ## 格式说明
//! ```text
//! 248
//! # S(Q) argon, merged banks
//! # Q  S(Q)
//! 0.50  0.0321
//! 0.55  0.0334
//! ...
//! ```
//! - 跳过开头 `skip_rows` 行
//! - 之后的空行和 `#` 开头的行忽略
//! - 列以正则分隔符切分，按 `x_column` / `y_column` 取值
//!
//! ## 依赖关系
//! - 被 `stog/merge.rs` 使用
//! - 使用 `regex` 切分列

use crate::error::{Result, StogError};
use crate::models::config::ReadingConfig;
use crate::models::Curve;
use regex::Regex;
use std::fs;
use std::path::Path;

/// 读取列数据文件
pub fn read_columns(path: &Path, reading: &ReadingConfig) -> Result<Curve> {
    if !path.exists() {
        return Err(StogError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StogError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_columns_content(&content, &path.display().to_string(), reading)
}

/// 从字符串内容解析列数据
pub fn parse_columns_content(content: &str, path: &str, reading: &ReadingConfig) -> Result<Curve> {
    let separator = Regex::new(&reading.separator).map_err(|e| {
        StogError::Configuration(format!("invalid separator '{}': {}", reading.separator, e))
    })?;

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, line) in content.lines().enumerate().skip(reading.skip_rows) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = separator.split(line).filter(|s| !s.is_empty()).collect();
        x.push(parse_field(&fields, reading.x_column, path, idx + 1)?);
        y.push(parse_field(&fields, reading.y_column, path, idx + 1)?);
    }

    if x.is_empty() {
        return Err(StogError::ParseError {
            path: path.to_string(),
            line: content.lines().count(),
            reason: "no data rows found".to_string(),
        });
    }

    Curve::new(x, y)
}

fn parse_field(fields: &[&str], column: usize, path: &str, line: usize) -> Result<f64> {
    let raw = fields.get(column).ok_or_else(|| StogError::ParseError {
        path: path.to_string(),
        line,
        reason: format!("expected at least {} columns, found {}", column + 1, fields.len()),
    })?;

    raw.parse().map_err(|_| StogError::ParseError {
        path: path.to_string(),
        line,
        reason: format!("'{}' is not a number", raw),
    })
}
