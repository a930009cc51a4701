//! # StoG 处理流程
//!
//! ## 阶段
//! 1. 读取并准备各数据集，合并为 S(Q)
//! 2. S(Q) → 配置的实空间函数（不加 Lorch 窗）
//! 3. 可选 Fourier 滤波
//! 4. 可选 Lorch 窗重新变换
//! 5. Keen 形式输出 `FK(Q)` 与 `GK(r)`
//!
//! ## 输出文件
//! | 文件 | 内容 |
//! |------|------|
//! | `<stem>.sq` | 合并后的 S(Q) |
//! | `<stem>.gr` | 合并后的实空间函数 |
//! | `ft.dat` | Fourier 滤波伪影 |
//! | `<stem>_ft.sq` | 滤波后的 S(Q) |
//! | `<stem>_ft.gr` | 滤波后的实空间函数 |
//! | `<stem>_ft_lorched.gr` | Lorch 窗实空间函数 |
//! | `<stem>_rmc.fq` | FK(Q) |
//! | `<stem>_rmc.gr` | GK(r) |
//!
//! ## 依赖关系
//! - 使用 `stog/merge.rs`, `stog/export.rs`, `stog/plot.rs`
//! - 使用 `transform/` 的变换与滤波
//! - 被 `commands/run.rs` 调用

use crate::error::Result;
use crate::models::{Curve, RealKind, ReciprocalKind, StogConfig, TransformOptions};
use crate::stog::export::write_curve;
use crate::stog::merge::{load_dataset, merge_datasets};
use crate::stog::plot::{plot_curves, Series};
use crate::transform::{FilterOutput, FourierFilter, Transformer};

use std::path::{Path, PathBuf};

/// 低 r 诊断的积分上限
pub const LOW_R_LIMIT: f64 = 1.01;

/// 各阶段结果
#[derive(Debug, Clone)]
pub struct StogResults {
    /// 实空间函数类型
    pub real_kind: RealKind,
    /// 各文件准备后的 S(Q)
    pub datasets: Vec<Curve>,
    /// 合并后的 S(Q)
    pub merged: Curve,
    /// 合并 S(Q) 的实空间变换
    pub real: Curve,
    /// 合并实空间函数在 `r ≤ 1.01` 的 `sqrt(Σ y²)`
    pub low_r_rms: f64,
    pub filtered: Option<FilterOutput>,
    pub lorched: Option<Curve>,
    /// FK(Q)
    pub keen_reciprocal: Curve,
    /// GK(r)
    pub keen_real: Curve,
}

impl StogResults {
    /// 最终使用的 S(Q)（滤波后优先）
    pub fn final_structure(&self) -> &Curve {
        self.filtered
            .as_ref()
            .map(|f| &f.reciprocal)
            .unwrap_or(&self.merged)
    }

    /// 最终的实空间函数（Lorch > 滤波 > 合并）
    pub fn final_real(&self) -> &Curve {
        self.lorched
            .as_ref()
            .or(self.filtered.as_ref().map(|f| &f.real))
            .unwrap_or(&self.real)
    }
}

/// StoG 处理流程
#[derive(Debug)]
pub struct StogPipeline {
    config: StogConfig,
    base_dir: PathBuf,
}

impl StogPipeline {
    /// 创建流程并校验配置
    pub fn new(config: StogConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            base_dir: PathBuf::from("."),
        })
    }

    /// 数据文件的相对路径基准目录
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn config(&self) -> &StogConfig {
        &self.config
    }

    /// 实空间网格 `r = Rdelta·k`，`k = 1..=round(Rmax/Rdelta)`
    pub fn real_grid(&self) -> Vec<f64> {
        let rdelta = self.config.rdelta();
        let n = (self.config.rmax / rdelta).round() as usize;
        (1..=n).map(|k| rdelta * k as f64).collect()
    }

    /// 读取全部数据集
    pub fn load_datasets(&self) -> Result<Vec<Curve>> {
        let params = self.config.params();
        self.config
            .files
            .iter()
            .map(|file| {
                let sq = load_dataset(file, &self.base_dir, &self.config.reading, &params)?;
                log::info!(
                    "loaded {} ({}, {} points in [{}, {}])",
                    file.filename,
                    file.reciprocal_function,
                    sq.len(),
                    file.qmin,
                    file.qmax
                );
                Ok(sq)
            })
            .collect()
    }

    /// 执行完整流程
    pub fn run(&self) -> Result<StogResults> {
        let real_kind = self.config.real_kind()?;
        let transformer = Transformer::new(
            self.config.params(),
            TransformOptions::default().with_low_x_correction(self.config.low_x_correction),
        );

        let datasets = self.load_datasets()?;
        let merged = merge_datasets(&datasets, &self.config.merging.y)?;
        log::info!("merged {} datasets into {} Q points", datasets.len(), merged.len());

        let r = self.real_grid();
        log::debug!("real-space grid: {} points, dr = {}", r.len(), self.config.rdelta());

        let real = transformer.reciprocal_to_real(
            merged.x(),
            merged.y(),
            ReciprocalKind::Structure,
            &r,
            real_kind,
        )?;
        let merged_rms = low_r_rms(&real, LOW_R_LIMIT);
        log::info!("S(Q) -> {}: low-r rms = {:.6}", real_kind, merged_rms);

        let filtered = match self.config.filter_cutoff() {
            Some(cutoff) => {
                let out = FourierFilter::new(transformer).apply(
                    merged.x(),
                    merged.y(),
                    ReciprocalKind::Structure,
                    real.x(),
                    real.y(),
                    real_kind,
                    cutoff,
                    real_kind,
                )?;
                log::info!(
                    "fourier filter below r = {}: low-r rms = {:.6}",
                    cutoff,
                    low_r_rms(&out.real, LOW_R_LIMIT)
                );
                Some(out)
            }
            None => None,
        };

        let sq = filtered.as_ref().map(|f| &f.reciprocal).unwrap_or(&merged);

        let lorched = if self.config.lorch {
            let lorch = transformer.with_options(transformer.options().with_lorch(true));
            let out = lorch.reciprocal_to_real(sq.x(), sq.y(), ReciprocalKind::Structure, &r, real_kind)?;
            log::info!("applied Lorch window to {}", real_kind);
            Some(out)
        } else {
            None
        };

        let params = transformer.params();
        let keen_reciprocal = sq.with_values(ReciprocalKind::Keen.from_structure(sq.x(), sq.y(), params)?)?;

        let final_real = lorched
            .as_ref()
            .or(filtered.as_ref().map(|f| &f.real))
            .unwrap_or(&real);
        let big_g = real_kind.to_reduced(final_real.x(), final_real.y(), params)?;
        let keen_real = final_real.with_values(RealKind::Keen.from_reduced(final_real.x(), &big_g, params)?)?;
        log::info!("computed Keen FK(Q) and GK(r)");

        Ok(StogResults {
            real_kind,
            datasets,
            merged,
            real,
            low_r_rms: merged_rms,
            filtered,
            lorched,
            keen_reciprocal,
            keen_real,
        })
    }

    /// 写出全部结果文件，返回写出的路径
    pub fn write_outputs(&self, results: &StogResults, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let stem = &self.config.outputs.stem_name;
        let real_label = results.real_kind.label();
        let mut written = Vec::new();

        let mut write = |name: String, curve: &Curve, comment: &str| -> Result<()> {
            let path = output_dir.join(name);
            write_curve(curve, comment, &path)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
            Ok(())
        };

        write(format!("{}.sq", stem), &results.merged, "merged S(Q)")?;
        write(format!("{}.gr", stem), &results.real, &format!("merged {}", real_label))?;

        if let Some(filtered) = &results.filtered {
            write("ft.dat".to_string(), &filtered.artifact, "Fourier filter artifact S(Q)")?;
            write(format!("{}_ft.sq", stem), &filtered.reciprocal, "Fourier filtered S(Q)")?;
            write(
                format!("{}_ft.gr", stem),
                &filtered.real,
                &format!("Fourier filtered {}", real_label),
            )?;
        }

        if let Some(lorched) = &results.lorched {
            write(
                format!("{}_ft_lorched.gr", stem),
                lorched,
                &format!("Lorched {}", real_label),
            )?;
        }

        write(format!("{}_rmc.fq", stem), &results.keen_reciprocal, "F(Q) RMC")?;
        write(format!("{}_rmc.gr", stem), &results.keen_real, "G(r) RMC")?;

        if self.config.plot {
            written.extend(self.write_plots(results, output_dir)?);
        }

        Ok(written)
    }

    /// 各阶段的 PNG 图表
    fn write_plots(&self, results: &StogResults, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let stem = &self.config.outputs.stem_name;
        let real_label = results.real_kind.label();
        let mut written = Vec::new();

        let labels: Vec<String> = self.config.files.iter().map(|f| f.filename.clone()).collect();
        let mut series: Vec<Series<'_>> = results
            .datasets
            .iter()
            .zip(&labels)
            .map(|(curve, label)| Series { label, curve })
            .collect();
        series.push(Series {
            label: "merged",
            curve: &results.merged,
        });
        let path = output_dir.join(format!("{}_sq.png", stem));
        plot_curves(&series, "Merged S(Q)", "Q (1/Å)", "S(Q)", &path)?;
        written.push(path);

        let path = output_dir.join(format!("{}_gr.png", stem));
        plot_curves(
            &[Series {
                label: real_label,
                curve: &results.real,
            }],
            &format!("Merged {}", real_label),
            "r (Å)",
            real_label,
            &path,
        )?;
        written.push(path);

        if let Some(filtered) = &results.filtered {
            let path = output_dir.join(format!("{}_ft_sq.png", stem));
            plot_curves(
                &[
                    Series {
                        label: "merged",
                        curve: &results.merged,
                    },
                    Series {
                        label: "artifact",
                        curve: &filtered.artifact,
                    },
                    Series {
                        label: "filtered",
                        curve: &filtered.reciprocal,
                    },
                ],
                "Fourier Filtered S(Q)",
                "Q (1/Å)",
                "S(Q)",
                &path,
            )?;
            written.push(path);
        }

        let path = output_dir.join(format!("{}_final_gr.png", stem));
        plot_curves(
            &[Series {
                label: real_label,
                curve: results.final_real(),
            }],
            &format!("Final {}", real_label),
            "r (Å)",
            real_label,
            &path,
        )?;
        written.push(path);

        Ok(written)
    }
}

/// 低 r 区 `sqrt(Σ y²)`
pub fn low_r_rms(curve: &Curve, limit: f64) -> f64 {
    curve
        .points()
        .filter(|(r, _)| *r <= limit)
        .map(|(_, y)| y * y)
        .sum::<f64>()
        .sqrt()
}
