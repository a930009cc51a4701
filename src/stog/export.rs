//! # 结果导出
//!
//! 所有输出文件使用同一格式：
//! ```text
//! 4998
//! # g(r) argon
//! 0.01	-0.99712
//! 0.02	-1.00104
//! ...
//! ```
//! 第一行为点数，第二行为 `#` 注释，之后为制表符分隔的 `x	y` 数据行。
//!
//! ## 依赖关系
//! - 被 `stog/pipeline.rs` 调用
//! - 使用 `csv` 库写入数据行

use crate::error::{Result, StogError};
use crate::models::Curve;

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 写出一条曲线
pub fn write_curve(curve: &Curve, comment: &str, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| StogError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let mut file = File::create(output_path).map_err(write_err)?;
    writeln!(file, "{}", curve.len()).map_err(write_err)?;
    writeln!(file, "# {}", comment).map_err(write_err)?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file);

    for (x, y) in curve.points() {
        wtr.write_record(&[x.to_string(), y.to_string()])?;
    }

    wtr.flush().map_err(write_err)?;

    Ok(())
}
