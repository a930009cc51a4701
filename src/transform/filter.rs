//! # Fourier 滤波
//!
//! 去除实空间低 r 区（`r ≤ cutoff`）的非物理振荡：
//! 1. 实空间输入转到 G(r)，截取 `r ≤ cutoff` 部分
//! 2. 将该部分反变换回倒空间，得到伪影 `F_art(Q)`
//! 3. 从 `Q[S(Q) - 1]` 中扣除伪影
//! 4. 滤波后的倒空间数据重新正变换到实空间
//!
//! `cutoff` 不做截断检查：低于 `rmin` 时没有可扣除的点，滤波退化为原样
//! 输出；高于 `rmax` 时整个实空间区域都被视为伪影。
//!
//! 伪影定义域以 `Q[1] - Q[0]` 为步长向低端延伸；该步长退化
//! （见 `low_end_points`）时伪影只定义在原始 Q 上。
//!
//! ## 依赖关系
//! - 使用 `transform/transformer.rs` 的正弦核
//! - 使用 `transform/matrix.rs` 的规范形式转换
//! - 被 `stog/pipeline.rs` 使用

use crate::error::Result;
use crate::models::curve::check_pair;
use crate::models::{Curve, RealKind, ReciprocalKind};
use crate::transform::converter;
use crate::transform::transformer::{low_end_points, sine_integral, Transformer};

/// 滤波结果
#[derive(Debug, Clone)]
pub struct FilterOutput {
    /// 扣除伪影后的倒空间数据（与输入同类型、同定义域）
    pub reciprocal: Curve,
    /// 伪影曲线（与输入同类型，定义域自低 Q 延伸）
    pub artifact: Curve,
    /// 滤波后的实空间数据
    pub real: Curve,
}

/// Fourier 滤波器
#[derive(Debug, Clone, Copy)]
pub struct FourierFilter {
    transformer: Transformer,
}

impl FourierFilter {
    pub fn new(transformer: Transformer) -> Self {
        Self { transformer }
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// 通用入口
    ///
    /// `(q, values)` 为 `from` 类型的倒空间数据，`(r, real_values)` 为
    /// `real_from` 类型的实空间数据；滤波后的实空间结果按 `to` 输出。
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        q: &[f64],
        values: &[f64],
        from: ReciprocalKind,
        r: &[f64],
        real_values: &[f64],
        real_from: RealKind,
        cutoff: f64,
        to: RealKind,
    ) -> Result<FilterOutput> {
        let params = self.transformer.params();
        from.check_params(params)?;
        real_from.check_params(params)?;
        to.check_params(params)?;
        check_pair(q, values)?;
        check_pair(r, real_values)?;

        let sq = from.to_structure(q, values, params)?;
        let big_g = real_from.to_reduced(r, real_values, params)?;

        // 伪影定义域：低于 Qmin 的延伸点 + 原始 Q
        let mut q_art = low_end_points(q);
        let n_low = q_art.len();
        q_art.extend_from_slice(q);

        let n_cut = r.partition_point(|&v| v <= cutoff);
        let f_art = if n_cut == 0 {
            vec![0.0; q_art.len()]
        } else {
            sine_integral(&r[..n_cut], &big_g[..n_cut], &q_art, self.transformer.options().lorch)?
        };

        let fq = converter::s_to_f(q, &sq)?;
        let fq_filtered: Vec<f64> = fq
            .iter()
            .zip(&f_art[n_low..])
            .map(|(f, art)| f - art)
            .collect();
        let sq_filtered = converter::f_to_s(q, &fq_filtered)?;

        let reciprocal = Curve::new(q.to_vec(), from.from_structure(q, &sq_filtered, params)?)?;

        let sq_art = converter::f_to_s(&q_art, &f_art)?;
        let artifact_values = from.from_structure(&q_art, &sq_art, params)?;
        let artifact = Curve::new(q_art, artifact_values)?;

        let real = self
            .transformer
            .reciprocal_to_real(q, &sq_filtered, ReciprocalKind::Structure, r, to)?;

        Ok(FilterOutput {
            reciprocal,
            artifact,
            real,
        })
    }

    /// 以 g(r) 为实空间形式滤波
    pub fn g_using(
        &self,
        q: &[f64],
        values: &[f64],
        from: ReciprocalKind,
        r: &[f64],
        gr: &[f64],
        cutoff: f64,
    ) -> Result<FilterOutput> {
        self.apply(
            q,
            values,
            from,
            r,
            gr,
            RealKind::PairDistribution,
            cutoff,
            RealKind::PairDistribution,
        )
    }

    /// 以 G(r) 为实空间形式滤波
    pub fn big_g_using(
        &self,
        q: &[f64],
        values: &[f64],
        from: ReciprocalKind,
        r: &[f64],
        big_gr: &[f64],
        cutoff: f64,
    ) -> Result<FilterOutput> {
        self.apply(q, values, from, r, big_gr, RealKind::Reduced, cutoff, RealKind::Reduced)
    }

    /// 以 GK(r) 为实空间形式滤波
    pub fn gk_using(
        &self,
        q: &[f64],
        values: &[f64],
        from: ReciprocalKind,
        r: &[f64],
        gk: &[f64],
        cutoff: f64,
    ) -> Result<FilterOutput> {
        self.apply(q, values, from, r, gk, RealKind::Keen, cutoff, RealKind::Keen)
    }
}
