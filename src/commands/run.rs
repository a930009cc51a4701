//! # run 命令实现
//!
//! 构建运行配置并执行完整 StoG 流程。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `parsers/config.rs`, `stog/pipeline.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::run::{RunArgs, FILE_ARG_COUNT};
use crate::utils::{output, progress};

use anyhow::{bail, Context};
use std::fs;
use stog::models::config::{
    AffineConfig, FourierFilterConfig, MergingConfig, OffsetConfig, OutputsConfig, ReadingConfig,
};
use stog::models::{FileConfig, StogConfig};
use stog::parsers::load_config;
use stog::stog::pipeline::LOW_R_LIMIT;
use stog::stog::{StogPipeline, StogResults};
use tabled::{Table, Tabled};

/// 数据集摘要表行
#[derive(Tabled)]
struct DatasetRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Q range (1/Å)")]
    range: String,
    #[tabled(rename = "Points")]
    points: usize,
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    output::print_header("StoG: S(Q) -> real space");

    let config = match &args.json {
        Some(path) => {
            output::print_info(&format!("Loading config from '{}'", path.display()));
            load_config(path).with_context(|| format!("cannot load {}", path.display()))?
        }
        None => config_from_args(&args)?,
    };

    super::configure_threads(args.jobs);

    let pipeline = StogPipeline::new(config).context("invalid run configuration")?;

    let spinner = progress::create_spinner("Merging and transforming");
    let results = pipeline.run();
    spinner.finish_and_clear();
    let results = results.context("StoG pipeline failed")?;

    print_summary(&pipeline, &results);

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("cannot create {}", args.output_dir.display()))?;
    let written = pipeline
        .write_outputs(&results, &args.output_dir)
        .context("failed to write outputs")?;

    output::print_written(&written, &args.output_dir);

    Ok(())
}

fn print_summary(pipeline: &StogPipeline, results: &StogResults) {
    let rows: Vec<DatasetRow> = pipeline
        .config()
        .files
        .iter()
        .zip(&results.datasets)
        .map(|(file, sq)| DatasetRow {
            file: file.filename.clone(),
            kind: file.reciprocal_function.clone(),
            range: format!(
                "{:.3} - {:.3}",
                sq.x_min().unwrap_or(f64::NAN),
                sq.x_max().unwrap_or(f64::NAN)
            ),
            points: sq.len(),
        })
        .collect();
    println!("{}", Table::new(&rows));

    output::print_info(&format!(
        "Merged S(Q): {} points, {} -> {} points",
        results.merged.len(),
        results.real_kind,
        results.real.len()
    ));
    output::print_metric(&format!("Low-r rms (r <= {})", LOW_R_LIMIT), results.low_r_rms);

    let config = pipeline.config();
    let cutoff = config.filter_cutoff().map(|c| format!("r <= {}", c));
    output::print_stage("Fourier filter", cutoff.as_deref());
    output::print_stage("Lorch window", config.lorch.then_some("applied"));
    output::print_stage(
        "Low-Q correction",
        config.low_x_correction.then_some("[0, Qmin) from S(Qmin)"),
    );
}

/// 由命令行参数构建运行配置
fn config_from_args(args: &RunArgs) -> anyhow::Result<StogConfig> {
    let Some(density) = args.density else {
        bail!("--density is required when --json is not given");
    };
    if args.filenames.is_empty() {
        bail!("at least one -f/--filename dataset is required");
    }

    let files = args
        .filenames
        .chunks(FILE_ARG_COUNT)
        .map(file_from_values)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let merging = match args.merging.as_deref() {
        Some([offset, scale]) => AffineConfig {
            offset: *offset,
            scale: *scale,
        },
        Some(other) => bail!("--merging expects OFFSET SCALE, got {} value(s)", other.len()),
        None => AffineConfig::default(),
    };

    Ok(StogConfig {
        files,
        density,
        rmax: args.rmax,
        rpoints: args.rpoints,
        rdelta: args.rdelta,
        fourier_filter: args
            .fourier_filter_cutoff
            .map(|cutoff| FourierFilterConfig { cutoff: Some(cutoff) }),
        lorch: args.lorch_flag,
        plot: args.plot,
        outputs: OutputsConfig {
            stem_name: args.stem_name.clone(),
        },
        merging: MergingConfig { y: merging },
        bcoh_sqrd: args.bcoh_sqrd,
        btot_sqrd: Some(args.btot_sqrd),
        real_space_function: args.real_space_function.clone(),
        low_x_correction: args.low_x_correction,
        reading: ReadingConfig {
            skip_rows: args.skip_rows,
            separator: args.separator.clone(),
            ..ReadingConfig::default()
        },
    })
}

/// `FILENAME QMIN QMAX YOFFSET YSCALE QOFFSET KIND`
fn file_from_values(values: &[String]) -> anyhow::Result<FileConfig> {
    if values.len() != FILE_ARG_COUNT {
        bail!(
            "-f/--filename expects {} values, got {}",
            FILE_ARG_COUNT,
            values.len()
        );
    }

    let number = |idx: usize, name: &str| -> anyhow::Result<f64> {
        values[idx]
            .parse()
            .with_context(|| format!("{}: invalid {} '{}'", values[0], name, values[idx]))
    };

    Ok(FileConfig {
        filename: values[0].clone(),
        qmin: number(1, "Qmin")?,
        qmax: number(2, "Qmax")?,
        y: AffineConfig {
            offset: number(3, "Y offset")?,
            scale: number(4, "Y scale")?,
        },
        x: OffsetConfig {
            offset: number(5, "Q offset")?,
        },
        reciprocal_function: values[6].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> RunArgs {
        match Cli::parse_from(args).command {
            Commands::Run(args) => args,
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_config_from_flags() {
        let args = parse(&[
            "stog", "run", "--density", "0.0213", "-f", "a.sq", "0.5", "25", "0", "1", "0", "S(Q)",
            "-f", "b.fq", "1.0", "30", "-0.1", "2", "0.01", "F(Q)", "--merging", "0.1", "0.9",
            "--fourier-filter-cutoff", "1.5", "--lorch-flag",
        ]);
        let config = config_from_args(&args).unwrap();

        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[1].filename, "b.fq");
        assert_eq!(config.files[1].y.offset, -0.1);
        assert_eq!(config.files[1].x.offset, 0.01);
        assert_eq!(config.files[1].reciprocal_function, "F(Q)");
        assert_eq!(config.merging.y.scale, 0.9);
        assert_eq!(config.filter_cutoff(), Some(1.5));
        assert!(config.lorch);
        assert_eq!(config.rmax, 50.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_density_required_without_json() {
        let args = parse(&["stog", "run", "-f", "a.sq", "0.5", "25", "0", "1", "0", "S(Q)"]);
        assert!(config_from_args(&args).is_err());
    }

    #[test]
    fn test_bad_number_in_dataset_values() {
        let values: Vec<String> = ["a.sq", "x", "25", "0", "1", "0", "S(Q)"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = file_from_values(&values).unwrap_err();
        assert!(err.to_string().contains("Qmin"));
    }
}
