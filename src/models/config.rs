//! # StoG 运行配置
//!
//! 与原有 JSON 输入格式兼容的配置结构（字段名保持
//! `Files`, `NumberDensity`, `<b_coh>^2` 等写法）。
//!
//! ## JSON 示例
//! ```text
//! {
//!     "Files": [
//!         { "Filename": "argon.sq", "Qmin": 0.5, "Qmax": 25.0,
//!           "Y": { "Offset": 0.0, "Scale": 1.0 }, "X": { "Offset": 0.0 },
//!           "ReciprocalFunction": "S(Q)" }
//!     ],
//!     "NumberDensity": 0.0213,
//!     "Rmax": 50.0,
//!     "Rpoints": 5000,
//!     "FourierFilter": { "Cutoff": 1.5 },
//!     "LorchFlag": true,
//!     "PlotFlag": false,
//!     "Outputs": { "StemName": "argon" },
//!     "<b_coh>^2": 3.644,
//!     "RealSpaceFunction": "g(r)"
//! }
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/config.rs` 读取
//! - 被 `stog/pipeline.rs` 使用
//! - 使用 `serde` 反序列化

use crate::error::{Result, StogError};
use crate::models::{RealKind, ReciprocalKind, ScatteringParams};

use serde::{Deserialize, Serialize};

/// 单个输入文件的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(rename = "Filename")]
    pub filename: String,

    #[serde(rename = "Qmin")]
    pub qmin: f64,

    #[serde(rename = "Qmax")]
    pub qmax: f64,

    #[serde(rename = "Y", default)]
    pub y: AffineConfig,

    #[serde(rename = "X", default)]
    pub x: OffsetConfig,

    #[serde(rename = "ReciprocalFunction", default = "default_reciprocal_function")]
    pub reciprocal_function: String,
}

impl FileConfig {
    /// 文件的倒空间函数类型
    pub fn kind(&self) -> Result<ReciprocalKind> {
        self.reciprocal_function.parse()
    }
}

/// `y ← scale·y + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineConfig {
    #[serde(rename = "Offset", default)]
    pub offset: f64,

    #[serde(rename = "Scale", default = "default_scale")]
    pub scale: f64,
}

impl Default for AffineConfig {
    fn default() -> Self {
        Self {
            offset: 0.0,
            scale: 1.0,
        }
    }
}

/// `x ← x + offset`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OffsetConfig {
    #[serde(rename = "Offset", default)]
    pub offset: f64,
}

/// 合并后 S(Q) 的缩放与偏移
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MergingConfig {
    #[serde(rename = "Y", default)]
    pub y: AffineConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FourierFilterConfig {
    #[serde(rename = "Cutoff", default)]
    pub cutoff: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputsConfig {
    #[serde(rename = "StemName", default = "default_stem_name")]
    pub stem_name: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            stem_name: default_stem_name(),
        }
    }
}

/// 数据文件读取选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// 跳过的文件头行数
    #[serde(rename = "SkipRows", default = "default_skip_rows")]
    pub skip_rows: usize,

    /// 列分隔符（正则表达式）
    #[serde(rename = "Separator", default = "default_separator")]
    pub separator: String,

    #[serde(rename = "XColumn", default)]
    pub x_column: usize,

    #[serde(rename = "YColumn", default = "default_y_column")]
    pub y_column: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            skip_rows: default_skip_rows(),
            separator: default_separator(),
            x_column: 0,
            y_column: default_y_column(),
        }
    }
}

/// StoG 完整运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StogConfig {
    #[serde(rename = "Files")]
    pub files: Vec<FileConfig>,

    #[serde(rename = "NumberDensity")]
    pub density: f64,

    #[serde(rename = "Rmax", default = "default_rmax")]
    pub rmax: f64,

    #[serde(rename = "Rpoints", default = "default_rpoints")]
    pub rpoints: usize,

    #[serde(rename = "Rdelta", default)]
    pub rdelta: Option<f64>,

    #[serde(rename = "FourierFilter", default)]
    pub fourier_filter: Option<FourierFilterConfig>,

    #[serde(rename = "LorchFlag", default)]
    pub lorch: bool,

    #[serde(rename = "PlotFlag", default)]
    pub plot: bool,

    #[serde(rename = "Outputs", default)]
    pub outputs: OutputsConfig,

    #[serde(rename = "Merging", default)]
    pub merging: MergingConfig,

    #[serde(rename = "<b_coh>^2")]
    pub bcoh_sqrd: f64,

    #[serde(rename = "<b_tot^2>", default)]
    pub btot_sqrd: Option<f64>,

    #[serde(rename = "RealSpaceFunction", default = "default_real_space_function")]
    pub real_space_function: String,

    #[serde(rename = "OmittedXrangeCorrection", default)]
    pub low_x_correction: bool,

    #[serde(rename = "Reading", default)]
    pub reading: ReadingConfig,
}

impl StogConfig {
    /// 实空间步长：显式 `Rdelta` 优先，否则 `Rmax / Rpoints`
    pub fn rdelta(&self) -> f64 {
        self.rdelta
            .unwrap_or(self.rmax / self.rpoints.max(1) as f64)
    }

    /// Fourier 滤波截断半径（未配置则不滤波）
    pub fn filter_cutoff(&self) -> Option<f64> {
        self.fourier_filter.and_then(|f| f.cutoff)
    }

    pub fn real_kind(&self) -> Result<RealKind> {
        self.real_space_function.parse()
    }

    pub fn params(&self) -> ScatteringParams {
        ScatteringParams {
            rho: Some(self.density),
            bcoh_sqrd: Some(self.bcoh_sqrd),
            btot_sqrd: self.btot_sqrd,
        }
    }

    /// 在任何数值计算之前校验配置
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(StogError::Configuration(
                "no input files configured".to_string(),
            ));
        }

        let params = self.params();
        params.rho()?;
        params.bcoh_sqrd()?;
        self.real_kind()?;

        for file in &self.files {
            if file.kind()? == ReciprocalKind::CrossSection {
                params.btot_sqrd()?;
            }
            if !(file.qmin < file.qmax) {
                return Err(StogError::Configuration(format!(
                    "{}: Qmin ({}) must be below Qmax ({})",
                    file.filename, file.qmin, file.qmax
                )));
            }
        }

        if !(self.rmax > 0.0) {
            return Err(StogError::Configuration(format!(
                "Rmax must be positive, got {}",
                self.rmax
            )));
        }
        if self.rdelta.is_none() && self.rpoints == 0 {
            return Err(StogError::Configuration(
                "Rpoints must be at least 1".to_string(),
            ));
        }
        let rdelta = self.rdelta();
        if !(rdelta > 0.0 && rdelta <= self.rmax) {
            return Err(StogError::Configuration(format!(
                "Rdelta must lie in (0, Rmax], got {}",
                rdelta
            )));
        }
        if let Some(cutoff) = self.filter_cutoff() {
            if !cutoff.is_finite() {
                return Err(StogError::Configuration(format!(
                    "Fourier filter cutoff must be finite, got {}",
                    cutoff
                )));
            }
        }

        Ok(())
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_reciprocal_function() -> String {
    "S(Q)".to_string()
}

fn default_stem_name() -> String {
    "merged".to_string()
}

fn default_skip_rows() -> usize {
    3
}

fn default_separator() -> String {
    r"\s+".to_string()
}

fn default_y_column() -> usize {
    1
}

fn default_rmax() -> f64 {
    50.0
}

fn default_rpoints() -> usize {
    5000
}

fn default_real_space_function() -> String {
    "g(r)".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "Files": [
            { "Filename": "a.sq", "Qmin": 0.5, "Qmax": 25.0,
              "Y": { "Offset": 0.0, "Scale": 1.0 }, "X": { "Offset": 0.0 },
              "ReciprocalFunction": "S(Q)" }
        ],
        "NumberDensity": 0.0213,
        "Rmax": 20.0,
        "Rpoints": 1000,
        "Outputs": { "StemName": "argon" },
        "<b_coh>^2": 3.644
    }"#;

    #[test]
    fn test_defaults_applied() {
        let config: StogConfig = serde_json::from_str(MINIMAL).unwrap();
        assert_eq!(config.real_space_function, "g(r)");
        assert_eq!(config.merging.y, AffineConfig::default());
        assert!(config.filter_cutoff().is_none());
        assert!(!config.lorch);
        assert_eq!(config.reading.skip_rows, 3);
        assert!((config.rdelta() - 0.02).abs() < 1e-12);
        config.validate().unwrap();
    }

    #[test]
    fn test_explicit_rdelta_wins() {
        let mut config: StogConfig = serde_json::from_str(MINIMAL).unwrap();
        config.rdelta = Some(0.05);
        assert_eq!(config.rdelta(), 0.05);
    }

    #[test]
    fn test_dcs_requires_btot() {
        let mut config: StogConfig = serde_json::from_str(MINIMAL).unwrap();
        config.files[0].reciprocal_function = "DCS(Q)".to_string();
        assert!(config.validate().unwrap_err().is_configuration_error());
        config.btot_sqrd = Some(5.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_real_space_function() {
        let mut config: StogConfig = serde_json::from_str(MINIMAL).unwrap();
        config.real_space_function = "D(r)".to_string();
        assert!(matches!(
            config.validate(),
            Err(StogError::UnknownFunctionKind(_))
        ));
    }
}
