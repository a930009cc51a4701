//! # 物理参数与变换选项
//!
//! 调用时显式传入的配置结构，核心模块不持有任何全局可变状态。
//!
//! ## 依赖关系
//! - 被 `transform/`, `stog/` 使用

use crate::error::{Result, StogError};

/// 散射物理参数
///
/// 各参数均可缺省；只有在所请求的转换确实需要时才会校验，
/// 缺失或非正值在任何数值计算之前以配置错误返回。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScatteringParams {
    /// 数密度 ρ（原子/Å³）
    pub rho: Option<f64>,
    /// ⟨b_coh⟩²
    pub bcoh_sqrd: Option<f64>,
    /// ⟨b_tot²⟩
    pub btot_sqrd: Option<f64>,
}

impl ScatteringParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = Some(rho);
        self
    }

    pub fn with_bcoh_sqrd(mut self, bcoh_sqrd: f64) -> Self {
        self.bcoh_sqrd = Some(bcoh_sqrd);
        self
    }

    pub fn with_btot_sqrd(mut self, btot_sqrd: f64) -> Self {
        self.btot_sqrd = Some(btot_sqrd);
        self
    }

    /// 数密度，要求 ρ > 0
    pub fn rho(&self) -> Result<f64> {
        positive("number density rho", self.rho)
    }

    /// ⟨b_coh⟩²，要求 > 0
    pub fn bcoh_sqrd(&self) -> Result<f64> {
        positive("<b_coh>^2", self.bcoh_sqrd)
    }

    /// ⟨b_tot²⟩，要求有限
    pub fn btot_sqrd(&self) -> Result<f64> {
        match self.btot_sqrd {
            Some(v) if v.is_finite() => Ok(v),
            Some(v) => Err(StogError::Configuration(format!(
                "<b_tot^2> must be finite, got {}",
                v
            ))),
            None => Err(StogError::Configuration(
                "<b_tot^2> is required for DCS(Q) conversions".to_string(),
            )),
        }
    }
}

fn positive(name: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(StogError::Configuration(format!(
            "{} must be positive, got {}",
            name, v
        ))),
        None => Err(StogError::Configuration(format!(
            "{} is required for this conversion",
            name
        ))),
    }
}

/// 正弦变换选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// 启用 Lorch 阻尼窗
    pub lorch: bool,
    /// 对倒空间 → 实空间变换加入 [0, Qmin) 区间的解析修正
    pub low_x_correction: bool,
}

impl TransformOptions {
    pub fn with_lorch(mut self, lorch: bool) -> Self {
        self.lorch = lorch;
        self
    }

    pub fn with_low_x_correction(mut self, enabled: bool) -> Self {
        self.low_x_correction = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_is_configuration_error() {
        let params = ScatteringParams::new().with_rho(0.0213);
        assert_eq!(params.rho().unwrap(), 0.0213);
        let err = params.bcoh_sqrd().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(params.btot_sqrd().unwrap_err().is_configuration_error());
    }

    #[test]
    fn test_non_positive_density_rejected() {
        let params = ScatteringParams::new().with_rho(-1.0).with_bcoh_sqrd(0.0);
        assert!(params.rho().is_err());
        assert!(params.bcoh_sqrd().is_err());
    }
}
