//! # run 子命令 CLI 定义
//!
//! 参数可由 `--json` 配置文件整体给出，也可逐项给出。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::{ArgAction, Args};
use std::path::PathBuf;

/// `-f` 每组参数的个数
pub const FILE_ARG_COUNT: usize = 7;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Read all run parameters from a JSON configuration file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Number density (atoms/Å^3)
    #[arg(long)]
    pub density: Option<f64>,

    /// Input dataset: FILENAME QMIN QMAX YOFFSET YSCALE QOFFSET KIND (repeatable)
    #[arg(
        short = 'f',
        long = "filename",
        num_args = FILE_ARG_COUNT,
        action = ArgAction::Append,
        value_names = ["FILENAME", "QMIN", "QMAX", "YOFFSET", "YSCALE", "QOFFSET", "KIND"],
        allow_hyphen_values = true
    )]
    pub filenames: Vec<String>,

    /// Stem name for output files
    #[arg(long, default_value = "merged")]
    pub stem_name: String,

    /// Maximum r (Å) for real-space functions
    #[arg(long = "Rmax", default_value_t = 50.0)]
    pub rmax: f64,

    /// Number of points in r for real-space functions
    #[arg(long = "Rpoints", default_value_t = 5000)]
    pub rpoints: usize,

    /// Bin width in r (overrides --Rpoints)
    #[arg(long = "Rdelta")]
    pub rdelta: Option<f64>,

    /// Fourier filter cutoff in r (Å)
    #[arg(long)]
    pub fourier_filter_cutoff: Option<f64>,

    /// Apply the Lorch window
    #[arg(long, default_value_t = false)]
    pub lorch_flag: bool,

    /// <b_coh>^2, needed for FK(Q), DCS(Q) and the RMC outputs
    #[arg(long, default_value_t = 1.0)]
    pub bcoh_sqrd: f64,

    /// <b_tot^2>, needed for DCS(Q) input
    #[arg(long, default_value_t = 1.0)]
    pub btot_sqrd: f64,

    /// Offset and scale applied to the merged S(Q)
    #[arg(long, num_args = 2, value_names = ["OFFSET", "SCALE"], allow_hyphen_values = true)]
    pub merging: Option<Vec<f64>>,

    /// Real-space function: g(r), G(r) or GK(r)
    #[arg(long, default_value = "g(r)")]
    pub real_space_function: String,

    /// Write PNG plots of each stage
    #[arg(long, default_value_t = false)]
    pub plot: bool,

    /// Correct for the omitted [0, Qmin) range
    #[arg(long, default_value_t = false)]
    pub low_x_correction: bool,

    /// Header rows to skip in the input files
    #[arg(long, default_value_t = 3)]
    pub skip_rows: usize,

    /// Column separator (regular expression)
    #[arg(long, default_value = r"\s+")]
    pub separator: String,

    /// Directory for output files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
