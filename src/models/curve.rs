//! # 采样函数数据模型
//!
//! `Curve` 表示一条离散采样的物理量曲线 `(X, Y)`。
//!
//! ## 不变量
//! - `len(X) == len(Y)`
//! - `X` 严格递增，无重复点
//!
//! 每个操作都返回新的 `Curve`，不修改输入数组。
//!
//! ## 依赖关系
//! - 被 `transform/`, `stog/`, `parsers/` 使用
//! - 使用 `error.rs`

use crate::error::{Result, StogError};

/// 采样函数
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    /// 创建并校验曲线
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        check_pair(&x, &y)?;
        Ok(Self { x, y })
    }

    /// 定义域
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// 函数值
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// 定义域下界
    pub fn x_min(&self) -> Option<f64> {
        self.x.first().copied()
    }

    /// 定义域上界
    pub fn x_max(&self) -> Option<f64> {
        self.x.last().copied()
    }

    /// 按点迭代 `(x, y)`
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// 拆分为 `(X, Y)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }

    /// 在同一定义域上替换函数值
    pub fn with_values(&self, y: Vec<f64>) -> Result<Self> {
        Curve::new(self.x.clone(), y)
    }
}

/// 校验定义域严格递增且有限
pub fn check_axis(x: &[f64]) -> Result<()> {
    if let Some(index) = x.iter().position(|v| !v.is_finite()) {
        return Err(StogError::Domain(format!(
            "non-finite domain value at index {}",
            index
        )));
    }
    if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
        return Err(StogError::NotIncreasing { index: index + 1 });
    }
    Ok(())
}

/// 校验 `(X, Y)` 长度一致且 `X` 严格递增
pub fn check_pair(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(StogError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    check_axis(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_rejects_mismatched_lengths() {
        let err = Curve::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            StogError::LengthMismatch { x_len: 2, y_len: 1 }
        ));
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_curve_rejects_duplicates() {
        let err = Curve::new(vec![1.0, 2.0, 2.0], vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, StogError::NotIncreasing { index: 2 }));
    }

    #[test]
    fn test_curve_accessors() {
        let curve = Curve::new(vec![0.5, 1.0, 1.5], vec![3.0, 2.0, 1.0]).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.x_min(), Some(0.5));
        assert_eq!(curve.x_max(), Some(1.5));
        let points: Vec<_> = curve.points().collect();
        assert_eq!(points[1], (1.0, 2.0));
    }
}
