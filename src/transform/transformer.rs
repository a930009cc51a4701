//! # 倒空间 ↔ 实空间正弦变换
//!
//! 实现数值正弦 Fourier 变换对及其辅助工具。
//!
//! ## 算法概述
//! 1. 定义域裁剪 `apply_cropping`
//! 2. 输出定义域向低端延伸 `extend_axis_to_low_end`
//! 3. 梯形积分正弦核 `Σ ΔQ_i · L(Q_i) · Y(Q_i) · sin(Q_i r)`
//! 4. 可选 Lorch 阻尼窗 `L(Q) = sin(πQ/Qmax) / (πQ/Qmax)`
//! 5. 可选 [0, Qmin) 缺失区间的解析修正
//!
//! 变换对约定：
//! - `G(r) = (2/π) ∫ Q[S(Q) - 1] sin(Qr) dQ`
//! - `Q[S(Q) - 1] = ∫ G(r) sin(Qr) dr`
//!
//! ## 依赖关系
//! - 被 `transform/matrix.rs`, `transform/filter.rs`, `stog/` 使用
//! - 使用 `transform/converter.rs` 在规范形式之间转换
//! - 使用 `rayon` 在输出点上并行求和

use crate::error::{Result, StogError};
use crate::models::curve::{check_axis, check_pair};
use crate::models::{Curve, ScatteringParams, TransformOptions};
use crate::transform::converter;

use rayon::prelude::*;
use std::f64::consts::PI;

/// 延伸定义域时保留的小数位数
pub const AXIS_DECIMALS: i32 = 4;

/// 向低端延伸时允许生成的最大点数，超出视为步长退化
pub const MAX_EXTENDED_POINTS: usize = 10_000_000;

// ─────────────────────────────────────────────────────────────
// 定义域工具
// ─────────────────────────────────────────────────────────────

/// 截取 `min ≤ X ≤ max` 的连续子区间
pub fn apply_cropping(x: &[f64], y: &[f64], min: f64, max: f64) -> Result<Curve> {
    check_pair(x, y)?;
    if !(min <= max) {
        return Err(StogError::EmptyRange { min, max });
    }

    let start = x.partition_point(|&v| v < min);
    let end = x.partition_point(|&v| v <= max);
    if start >= end {
        return Err(StogError::EmptyRange { min, max });
    }

    Curve::new(x[start..end].to_vec(), y[start..end].to_vec())
}

/// 等间距网格 `[start, stop]`，共 `num` 个点，末点精确等于 `stop`
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut grid: Vec<f64> = (0..num).map(|i| i as f64 * step + start).collect();
            grid[num - 1] = stop;
            grid
        }
    }
}

/// 将定义域向低端延伸到第一个步长处
///
/// 步长取 `x[1] - x[0]`，点数为 `⌊x_max / Δ⌋`（截断），上界保持不变，
/// 结果保留 [`AXIS_DECIMALS`] 位小数。点数超过 [`MAX_EXTENDED_POINTS`]
/// 时返回定义域错误。
pub fn extend_axis_to_low_end(x: &[f64]) -> Result<Vec<f64>> {
    if x.len() < 2 {
        return Err(StogError::Domain(format!(
            "cannot infer a step from a {}-point axis",
            x.len()
        )));
    }

    let dx = x[1] - x[0];
    if !(dx > 0.0) {
        return Err(StogError::NotIncreasing { index: 1 });
    }

    let x_max = x[x.len() - 1];
    let span = x_max / dx;
    if span > MAX_EXTENDED_POINTS as f64 {
        return Err(StogError::Domain(format!(
            "step {} is too small to extend an axis up to {}",
            dx, x_max
        )));
    }
    let num = span as usize;
    if num == 0 {
        return Err(StogError::Domain(format!(
            "upper bound {} lies below the step {}",
            x_max, dx
        )));
    }

    Ok(linspace(dx, x_max, num)
        .into_iter()
        .map(|v| round_decimals(v, AXIS_DECIMALS))
        .collect())
}

/// 低于 `x[0]` 的延伸点 `k·Δ`，`Δ = x[1] - x[0]`
///
/// 只生成 `(0, x[0])` 内的点，保留 [`AXIS_DECIMALS`] 位小数。
/// 少于两个点、步长非正或所需点数超过 [`MAX_EXTENDED_POINTS`] 时返回空。
pub fn low_end_points(x: &[f64]) -> Vec<f64> {
    if x.len() < 2 {
        return Vec::new();
    }

    let (x_min, dx) = (x[0], x[1] - x[0]);
    if !(dx > 0.0) || x_min / dx > MAX_EXTENDED_POINTS as f64 {
        return Vec::new();
    }

    (1usize..)
        .map(|k| round_decimals(k as f64 * dx, AXIS_DECIMALS))
        .take_while(|&v| v < x_min)
        .filter(|&v| v > 0.0)
        .collect()
}

fn round_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

// ─────────────────────────────────────────────────────────────
// 变换核
// ─────────────────────────────────────────────────────────────

/// Lorch 阻尼窗 `sin(πx/x_max) / (πx/x_max)`，在 `x_max` 处为 0
pub fn lorch_window(x: f64, x_max: f64) -> f64 {
    if x >= x_max {
        return 0.0;
    }
    sinc(PI * x / x_max)
}

/// 在给定输出点上对 `∫ L(x) y(x) sin(x r) dx` 做梯形积分
///
/// 不做任何归一化，也不改变输出定义域。
pub fn sine_integral(x_in: &[f64], y_in: &[f64], x_out: &[f64], lorch: bool) -> Result<Vec<f64>> {
    check_pair(x_in, y_in)?;
    check_axis(x_out)?;
    let x_max = match x_in.last() {
        Some(&v) => v,
        None => return Err(StogError::Domain("empty input domain".to_string())),
    };

    let weighted: Vec<f64> = x_in
        .iter()
        .zip(y_in)
        .map(|(&x, &y)| if lorch { lorch_window(x, x_max) * y } else { y })
        .collect();

    let y_out = x_out
        .par_iter()
        .map(|&r| {
            let mut sum = 0.0;
            let mut prev = weighted[0] * (x_in[0] * r).sin();
            for i in 1..x_in.len() {
                let next = weighted[i] * (x_in[i] * r).sin();
                sum += 0.5 * (x_in[i] - x_in[i - 1]) * (prev + next);
                prev = next;
            }
            sum
        })
        .collect();

    Ok(y_out)
}

/// 正弦 Fourier 变换
///
/// 输出定义域先经 [`extend_axis_to_low_end`] 重建，返回新定义域及其上的值。
pub fn fourier_transform(x_in: &[f64], y_in: &[f64], x_out: &[f64], lorch: bool) -> Result<Curve> {
    let x_out = extend_axis_to_low_end(x_out)?;
    let y_out = sine_integral(x_in, y_in, &x_out, lorch)?;
    Curve::new(x_out, y_out)
}

// ─────────────────────────────────────────────────────────────
// [0, Xmin) 缺失区间修正
// ─────────────────────────────────────────────────────────────

/// 无 Lorch 窗的修正项
///
/// 对应 `(2/π)(F1·y_min/x_min - F2)`，其中 `v = x_min·r`，
/// `F1 = (2v sin v - (v² - 2) cos v - 2)/r³`，`F2 = (sin v - v cos v)/r²`。
/// 两者写成 `x_min³·p(v)` 与 `x_min²·q(v)`，在 r → 0 处取极限。
pub fn low_x_term(x_min: f64, y_min: f64, r: f64) -> f64 {
    if x_min == 0.0 {
        return 0.0;
    }
    let v = x_min * r;
    (2.0 / PI) * x_min * x_min * (cubic_moment(v) * y_min - linear_moment(v))
}

/// 带 Lorch 窗的修正项
///
/// `vm = x_min(r - π/x_max)`，`vp = x_min(r + π/x_max)`，
/// `F1 = (term1 - term2)/(2π/x_max)`，`term = (v sin v + cos v - 1)/(r ∓ π/x_max)²`，
/// `F2 = (sin vm/(r - π/x_max) - sin vp/(r + π/x_max))/(2π/x_max)`，
/// 结果同样为 `(2/π)(F1·y_min/x_min - F2)`。
pub fn low_x_term_lorch(x_min: f64, x_max: f64, y_min: f64, r: f64) -> f64 {
    if x_min == 0.0 {
        return 0.0;
    }
    let pi_over_x_max = PI / x_max;
    let vm = x_min * (r - pi_over_x_max);
    let vp = x_min * (r + pi_over_x_max);

    let f1 = x_min * x_min * (cosine_moment(vm) - cosine_moment(vp)) / (2.0 * pi_over_x_max);
    let f2 = x_min * (sinc(vm) - sinc(vp)) / (2.0 * pi_over_x_max);

    (2.0 / PI) * (f1 * y_min / x_min - f2)
}

/// 对变换结果加上 [0, Xmin) 区间的解析修正
///
/// 假定输入函数在缺失区间内由边界值 `y_in[0]` 决定；`x_min` 与 `x_max`
/// 取自输入定义域。返回新的数组，不修改 `y_out`。
pub fn low_x_correction(
    x_in: &[f64],
    y_in: &[f64],
    x_out: &[f64],
    y_out: &[f64],
    lorch: bool,
) -> Result<Vec<f64>> {
    check_pair(x_in, y_in)?;
    check_pair(x_out, y_out)?;
    let (x_min, x_max, y_min) = match (x_in.first(), x_in.last(), y_in.first()) {
        (Some(&x_min), Some(&x_max), Some(&y_min)) => (x_min, x_max, y_min),
        _ => return Err(StogError::Domain("empty input domain".to_string())),
    };

    Ok(x_out
        .iter()
        .zip(y_out)
        .map(|(&r, &y)| {
            let term = if lorch {
                low_x_term_lorch(x_min, x_max, y_min, r)
            } else {
                low_x_term(x_min, y_min, r)
            };
            y + term
        })
        .collect())
}

/// sin(v)/v
fn sinc(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v.sin() / v
    }
}

/// `∫₀¹ t² sin(vt) dt = (2v sin v - (v² - 2) cos v - 2)/v³`
fn cubic_moment(v: f64) -> f64 {
    if v.abs() < 0.1 {
        let v2 = v * v;
        return v * (1.0 / 4.0 - v2 / 36.0 + v2 * v2 / 960.0 - v2 * v2 * v2 / 50400.0);
    }
    (2.0 * v * v.sin() - (v * v - 2.0) * v.cos() - 2.0) / (v * v * v)
}

/// `∫₀¹ t sin(vt) dt = (sin v - v cos v)/v²`
fn linear_moment(v: f64) -> f64 {
    if v.abs() < 0.1 {
        let v2 = v * v;
        return v * (1.0 / 3.0 - v2 / 30.0 + v2 * v2 / 840.0 - v2 * v2 * v2 / 45360.0);
    }
    (v.sin() - v * v.cos()) / (v * v)
}

/// `(v sin v + cos v - 1)/v²`
fn cosine_moment(v: f64) -> f64 {
    if v.abs() < 0.1 {
        let v2 = v * v;
        return 0.5 - v2 / 8.0 + v2 * v2 / 144.0 - v2 * v2 * v2 / 5760.0;
    }
    (v * v.sin() + v.cos() - 1.0) / (v * v)
}

// ─────────────────────────────────────────────────────────────
// 规范形式之间的变换
// ─────────────────────────────────────────────────────────────

/// 变换器
///
/// 持有调用时传入的物理参数与变换选项；所有方法均为纯函数。
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    params: ScatteringParams,
    options: TransformOptions,
}

impl Transformer {
    /// 创建新的变换器
    pub fn new(params: ScatteringParams, options: TransformOptions) -> Self {
        Self { params, options }
    }

    pub fn params(&self) -> &ScatteringParams {
        &self.params
    }

    pub fn options(&self) -> TransformOptions {
        self.options
    }

    /// 同参数、不同选项的变换器
    pub fn with_options(&self, options: TransformOptions) -> Self {
        Self {
            params: self.params,
            options,
        }
    }

    /// S(Q) → G(r)
    pub(crate) fn structure_to_reduced(&self, q: &[f64], sq: &[f64], r: &[f64]) -> Result<Curve> {
        let lorch = self.options.lorch;
        let fq = converter::s_to_f(q, sq)?;
        let transformed = fourier_transform(q, &fq, r, lorch)?;
        let (r_out, gr) = transformed.into_parts();
        let mut gr: Vec<f64> = gr.into_iter().map(|v| v * 2.0 / PI).collect();

        if self.options.low_x_correction {
            gr = low_x_correction(q, sq, &r_out, &gr, lorch)?;
        }

        Curve::new(r_out, gr)
    }

    /// G(r) → S(Q)
    pub(crate) fn reduced_to_structure(&self, r: &[f64], gr: &[f64], q: &[f64]) -> Result<Curve> {
        let transformed = fourier_transform(r, gr, q, self.options.lorch)?;
        let sq = converter::f_to_s(transformed.x(), transformed.y())?;
        transformed.with_values(sq)
    }
}
