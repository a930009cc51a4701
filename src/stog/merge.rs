//! # 数据集准备与合并
//!
//! 每个输入文件依次经过：
//! 1. 裁剪到 `[Qmin, Qmax]`
//! 2. `y ← scale·y + offset`，`x ← x + offset`
//! 3. 由文件声明的倒空间类型转换到 S(Q)
//!
//! 多个数据集在全部 Q 点的并集上逐点平均（某点只出现在部分数据集时
//! 只对这些数据集平均），最后施加合并缩放与偏移。
//!
//! ## 依赖关系
//! - 使用 `parsers/columns.rs` 读取文件
//! - 使用 `transform/` 的裁剪与仿射转换
//! - 被 `stog/pipeline.rs` 使用

use crate::error::{Result, StogError};
use crate::models::config::{AffineConfig, ReadingConfig};
use crate::models::{Curve, FileConfig, ScatteringParams};
use crate::parsers::read_columns;
use crate::transform::apply_cropping;

use std::path::Path;

/// 读取并准备单个数据集，返回 S(Q)
pub fn load_dataset(
    file: &FileConfig,
    base_dir: &Path,
    reading: &ReadingConfig,
    params: &ScatteringParams,
) -> Result<Curve> {
    let path = base_dir.join(&file.filename);
    let raw = read_columns(&path, reading)?;
    prepare_dataset(&raw, file, params)
}

/// 对已读入的数据做裁剪、缩放偏移和类型转换
pub fn prepare_dataset(raw: &Curve, file: &FileConfig, params: &ScatteringParams) -> Result<Curve> {
    let kind = file.kind()?;
    kind.check_params(params)?;

    let cropped = apply_cropping(raw.x(), raw.y(), file.qmin, file.qmax)?;

    let x: Vec<f64> = cropped.x().iter().map(|q| q + file.x.offset).collect();
    let y: Vec<f64> = cropped
        .y()
        .iter()
        .map(|v| file.y.scale * v + file.y.offset)
        .collect();

    let sq = kind.to_structure(&x, &y, params)?;
    Curve::new(x, sq)
}

/// 在 Q 并集上平均多个 S(Q) 数据集并施加合并缩放与偏移
pub fn merge_datasets(datasets: &[Curve], merging: &AffineConfig) -> Result<Curve> {
    if datasets.is_empty() {
        return Err(StogError::Configuration(
            "no datasets to merge".to_string(),
        ));
    }

    let mut points: Vec<(f64, f64)> = datasets.iter().flat_map(|d| d.points()).collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut x: Vec<f64> = Vec::with_capacity(points.len());
    let mut sums: Vec<(f64, usize)> = Vec::with_capacity(points.len());
    for (q, s) in points {
        match (x.last(), sums.last_mut()) {
            (Some(&last), Some(acc)) if last == q => {
                acc.0 += s;
                acc.1 += 1;
            }
            _ => {
                x.push(q);
                sums.push((s, 1));
            }
        }
    }

    let y = sums
        .into_iter()
        .map(|(sum, n)| merging.scale * (sum / n as f64) + merging.offset)
        .collect();

    Curve::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OffsetConfig;
    use std::fs;
    use tempfile::tempdir;

    fn file_config(name: &str, kind: &str) -> FileConfig {
        FileConfig {
            filename: name.to_string(),
            qmin: 1.0,
            qmax: 3.0,
            y: AffineConfig::default(),
            x: OffsetConfig::default(),
            reciprocal_function: kind.to_string(),
        }
    }

    #[test]
    fn test_prepare_crops_scales_and_converts() {
        let raw = Curve::new(vec![0.5, 1.0, 2.0, 3.0, 4.0], vec![9.0, 0.5, 1.0, 1.5, 9.0]).unwrap();
        let mut file = file_config("a", "F(Q)");
        file.y = AffineConfig {
            offset: 0.5,
            scale: 2.0,
        };
        file.x = OffsetConfig { offset: 0.1 };

        let sq = prepare_dataset(&raw, &file, &ScatteringParams::new()).unwrap();
        assert_eq!(sq.len(), 3);
        let expected_x = [1.1, 2.1, 3.1];
        // F = 2y + 0.5, S = F/Q + 1
        let expected_y = [1.5 / 1.1 + 1.0, 2.5 / 2.1 + 1.0, 3.5 / 3.1 + 1.0];
        for i in 0..3 {
            assert!((sq.x()[i] - expected_x[i]).abs() < 1e-12);
            assert!((sq.y()[i] - expected_y[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_prepare_requires_bcoh_for_keen() {
        let raw = Curve::new(vec![1.0, 2.0], vec![0.0, 0.0]).unwrap();
        let err = prepare_dataset(&raw, &file_config("a", "FK(Q)"), &ScatteringParams::new())
            .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_merge_averages_on_union() {
        let a = Curve::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]).unwrap();
        let b = Curve::new(vec![2.0, 3.0, 4.0], vec![4.0, 5.0, 6.0]).unwrap();
        let merged = merge_datasets(&[a, b], &AffineConfig::default()).unwrap();
        assert_eq!(merged.x(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(merged.y(), &[1.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn test_merge_applies_scale_and_offset() {
        let a = Curve::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        let merging = AffineConfig {
            offset: -1.0,
            scale: 3.0,
        };
        let merged = merge_datasets(&[a], &merging).unwrap();
        assert_eq!(merged.y(), &[2.0, 5.0]);
    }

    #[test]
    fn test_merge_empty_is_configuration_error() {
        assert!(merge_datasets(&[], &AffineConfig::default())
            .unwrap_err()
            .is_configuration_error());
    }

    #[test]
    fn test_load_dataset_relative_to_base_dir() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("bank1.sq"),
            "3\n# bank 1\n# Q S\n0.5 0.9\n1.0 0.8\n2.0 1.1\n3.0 1.0\n3.5 1.0\n",
        )
        .unwrap();

        let sq = load_dataset(
            &file_config("bank1.sq", "S(Q)"),
            dir.path(),
            &ReadingConfig::default(),
            &ScatteringParams::new(),
        )
        .unwrap();
        assert_eq!(sq.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(sq.y(), &[0.8, 1.1, 1.0]);
    }
}
