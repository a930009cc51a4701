//! # transform 命令实现
//!
//! 读取一条曲线，经转换矩阵转到目标函数形式后写出。
//!
//! ## 依赖关系
//! - 使用 `cli/transform.rs` 定义的参数
//! - 使用 `parsers/columns.rs`, `transform/matrix.rs`, `stog/export.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::transform::TransformArgs;
use crate::utils::{output, progress};

use anyhow::{bail, Context};
use stog::models::config::ReadingConfig;
use stog::models::{FunctionKind, ScatteringParams, TransformOptions};
use stog::parsers::read_columns;
use stog::stog::export::write_curve;
use stog::Transformer;

/// 执行 transform 命令
pub fn execute(args: TransformArgs) -> anyhow::Result<()> {
    let from: FunctionKind = args.from.parse()?;
    let to: FunctionKind = args.to.parse()?;
    output::print_header(&format!("Transforming {} -> {}", from, to));

    if !(args.grid_step > 0.0 && args.grid_step <= args.grid_max) {
        bail!(
            "--grid-step must lie in (0, --grid-max], got {} with max {}",
            args.grid_step,
            args.grid_max
        );
    }

    super::configure_threads(args.jobs);

    let reading = ReadingConfig {
        skip_rows: args.skip_rows,
        separator: args.separator.clone(),
        ..ReadingConfig::default()
    };
    let input = read_columns(&args.input, &reading)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    output::print_info(&format!("Read {} points from {}", input.len(), args.input.display()));

    let params = ScatteringParams {
        rho: args.density,
        bcoh_sqrd: args.bcoh_sqrd,
        btot_sqrd: args.btot_sqrd,
    };
    let options = TransformOptions::default()
        .with_lorch(args.lorch)
        .with_low_x_correction(args.low_x_correction);
    let transformer = Transformer::new(params, options);

    let n = (args.grid_max / args.grid_step).round() as usize;
    let grid: Vec<f64> = (1..=n).map(|k| args.grid_step * k as f64).collect();

    let spinner = progress::create_spinner("Transforming");
    let result = transformer.convert(input.x(), input.y(), from, &grid, to);
    spinner.finish_and_clear();
    let curve = result.with_context(|| format!("{} -> {} failed", from, to))?;

    write_curve(&curve, &format!("{} from {}", to, args.input.display()), &args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    output::print_conversion(&args.input, &args.output);

    Ok(())
}
