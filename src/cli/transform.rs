//! # transform 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/transform.rs`

use clap::Args;
use std::path::PathBuf;

/// transform 子命令参数
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Input two-column data file
    pub input: PathBuf,

    /// Function kind of the input, e.g. "S(Q)" or "g(r)"
    #[arg(long)]
    pub from: String,

    /// Function kind of the output, e.g. "G(r)" or "FK(Q)"
    #[arg(long)]
    pub to: String,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number density (atoms/Å^3)
    #[arg(long)]
    pub density: Option<f64>,

    /// <b_coh>^2
    #[arg(long)]
    pub bcoh_sqrd: Option<f64>,

    /// <b_tot^2>
    #[arg(long)]
    pub btot_sqrd: Option<f64>,

    /// Upper end of the output grid when changing space
    #[arg(long, default_value_t = 50.0)]
    pub grid_max: f64,

    /// Step of the output grid when changing space
    #[arg(long, default_value_t = 0.01)]
    pub grid_step: f64,

    /// Apply the Lorch window
    #[arg(long, default_value_t = false)]
    pub lorch: bool,

    /// Correct for the omitted [0, Qmin) range
    #[arg(long, default_value_t = false)]
    pub low_x_correction: bool,

    /// Header rows to skip in the input file
    #[arg(long, default_value_t = 3)]
    pub skip_rows: usize,

    /// Column separator (regular expression)
    #[arg(long, default_value = r"\s+")]
    pub separator: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
