//! # 转换矩阵
//!
//! {S, F, FK, DCS} × {g, G, GK} 两个方向共 24 个转换。
//!
//! 每个转换由三步组成：
//! 1. 输入经仿射关系转到本空间的规范形式（倒空间 S(Q)，实空间 G(r)）
//! 2. 规范形式之间做正弦变换
//! 3. 结果经仿射关系转到所需形式
//!
//! 新增一种函数形式只需在 `to_*` / `from_*` 表中补一对关系。
//!
//! ## 依赖关系
//! - 使用 `transform/converter.rs` 的仿射关系
//! - 使用 `transform/transformer.rs` 的 `Transformer`
//! - 被 `transform/filter.rs`, `stog/pipeline.rs`, `commands/transform.rs` 使用

use crate::error::Result;
use crate::models::curve::check_pair;
use crate::models::{Curve, FunctionKind, RealKind, ReciprocalKind, ScatteringParams};
use crate::transform::converter;
use crate::transform::transformer::Transformer;

// ─────────────────────────────────────────────────────────────
// 倒空间规范形式 S(Q)
// ─────────────────────────────────────────────────────────────

impl ReciprocalKind {
    /// 校验该形式所需的参数
    pub fn check_params(&self, params: &ScatteringParams) -> Result<()> {
        match self {
            ReciprocalKind::Structure | ReciprocalKind::Reduced => Ok(()),
            ReciprocalKind::Keen => params.bcoh_sqrd().map(|_| ()),
            ReciprocalKind::CrossSection => {
                params.bcoh_sqrd()?;
                params.btot_sqrd().map(|_| ())
            }
        }
    }

    /// 转到 S(Q)
    pub fn to_structure(&self, q: &[f64], values: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
        match self {
            ReciprocalKind::Structure => {
                check_pair(q, values)?;
                Ok(values.to_vec())
            }
            ReciprocalKind::Reduced => converter::f_to_s(q, values),
            ReciprocalKind::Keen => converter::fk_to_s(q, values, params),
            ReciprocalKind::CrossSection => converter::dcs_to_s(q, values, params),
        }
    }

    /// 由 S(Q) 转出
    pub fn from_structure(&self, q: &[f64], sq: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
        match self {
            ReciprocalKind::Structure => {
                check_pair(q, sq)?;
                Ok(sq.to_vec())
            }
            ReciprocalKind::Reduced => converter::s_to_f(q, sq),
            ReciprocalKind::Keen => converter::s_to_fk(q, sq, params),
            ReciprocalKind::CrossSection => converter::s_to_dcs(q, sq, params),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 实空间规范形式 G(r)
// ─────────────────────────────────────────────────────────────

impl RealKind {
    /// 校验该形式所需的参数
    pub fn check_params(&self, params: &ScatteringParams) -> Result<()> {
        match self {
            RealKind::Reduced => Ok(()),
            RealKind::PairDistribution => params.rho().map(|_| ()),
            RealKind::Keen => {
                params.rho()?;
                params.bcoh_sqrd().map(|_| ())
            }
        }
    }

    /// 转到 G(r)
    pub fn to_reduced(&self, r: &[f64], values: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
        match self {
            RealKind::Reduced => {
                check_pair(r, values)?;
                Ok(values.to_vec())
            }
            RealKind::PairDistribution => converter::g_to_big_g(r, values, params),
            RealKind::Keen => converter::gk_to_big_g(r, values, params),
        }
    }

    /// 由 G(r) 转出
    pub fn from_reduced(&self, r: &[f64], big_gr: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
        match self {
            RealKind::Reduced => {
                check_pair(r, big_gr)?;
                Ok(big_gr.to_vec())
            }
            RealKind::PairDistribution => converter::big_g_to_g(r, big_gr, params),
            RealKind::Keen => converter::big_g_to_gk(r, big_gr, params),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 通用转换
// ─────────────────────────────────────────────────────────────

impl Transformer {
    /// 倒空间 → 实空间
    pub fn reciprocal_to_real(
        &self,
        q: &[f64],
        values: &[f64],
        from: ReciprocalKind,
        r: &[f64],
        to: RealKind,
    ) -> Result<Curve> {
        from.check_params(self.params())?;
        to.check_params(self.params())?;

        let sq = from.to_structure(q, values, self.params())?;
        let big_g = self.structure_to_reduced(q, &sq, r)?;
        let out = to.from_reduced(big_g.x(), big_g.y(), self.params())?;
        big_g.with_values(out)
    }

    /// 实空间 → 倒空间
    pub fn real_to_reciprocal(
        &self,
        r: &[f64],
        values: &[f64],
        from: RealKind,
        q: &[f64],
        to: ReciprocalKind,
    ) -> Result<Curve> {
        from.check_params(self.params())?;
        to.check_params(self.params())?;

        let big_g = from.to_reduced(r, values, self.params())?;
        let sq = self.reduced_to_structure(r, &big_g, q)?;
        let out = to.from_structure(sq.x(), sq.y(), self.params())?;
        sq.with_values(out)
    }

    /// 任意两种形式之间的转换
    ///
    /// 跨空间时在 `grid` 上求值；同一空间内只做仿射转换，`grid` 被忽略。
    pub fn convert(
        &self,
        x: &[f64],
        values: &[f64],
        from: FunctionKind,
        grid: &[f64],
        to: FunctionKind,
    ) -> Result<Curve> {
        match (from, to) {
            (FunctionKind::Reciprocal(from), FunctionKind::Real(to)) => {
                self.reciprocal_to_real(x, values, from, grid, to)
            }
            (FunctionKind::Real(from), FunctionKind::Reciprocal(to)) => {
                self.real_to_reciprocal(x, values, from, grid, to)
            }
            (FunctionKind::Reciprocal(from), FunctionKind::Reciprocal(to)) => {
                from.check_params(self.params())?;
                to.check_params(self.params())?;
                let sq = from.to_structure(x, values, self.params())?;
                Curve::new(x.to_vec(), to.from_structure(x, &sq, self.params())?)
            }
            (FunctionKind::Real(from), FunctionKind::Real(to)) => {
                from.check_params(self.params())?;
                to.check_params(self.params())?;
                let big_g = from.to_reduced(x, values, self.params())?;
                Curve::new(x.to_vec(), to.from_reduced(x, &big_g, self.params())?)
            }
        }
    }

    /// 按标签字符串转换，未知标签返回 `UnknownFunctionKind`
    pub fn convert_by_label(
        &self,
        x: &[f64],
        values: &[f64],
        from: &str,
        grid: &[f64],
        to: &str,
    ) -> Result<Curve> {
        let from: FunctionKind = from.parse()?;
        let to: FunctionKind = to.parse()?;
        self.convert(x, values, from, grid, to)
    }
}

// ─────────────────────────────────────────────────────────────
// 24 个具名转换
// ─────────────────────────────────────────────────────────────

macro_rules! reciprocal_to_real_ops {
    ($($name:ident => ($from:ident, $to:ident), $doc:literal;)*) => {
        impl Transformer {
            $(
                #[doc = $doc]
                pub fn $name(&self, q: &[f64], values: &[f64], r: &[f64]) -> Result<Curve> {
                    self.reciprocal_to_real(q, values, ReciprocalKind::$from, r, RealKind::$to)
                }
            )*
        }
    };
}

macro_rules! real_to_reciprocal_ops {
    ($($name:ident => ($from:ident, $to:ident), $doc:literal;)*) => {
        impl Transformer {
            $(
                #[doc = $doc]
                pub fn $name(&self, r: &[f64], values: &[f64], q: &[f64]) -> Result<Curve> {
                    self.real_to_reciprocal(r, values, RealKind::$from, q, ReciprocalKind::$to)
                }
            )*
        }
    };
}

reciprocal_to_real_ops! {
    s_to_g => (Structure, PairDistribution), "S(Q) → g(r)";
    s_to_big_g => (Structure, Reduced), "S(Q) → G(r)";
    s_to_gk => (Structure, Keen), "S(Q) → GK(r)";
    f_to_g => (Reduced, PairDistribution), "F(Q) → g(r)";
    f_to_big_g => (Reduced, Reduced), "F(Q) → G(r)";
    f_to_gk => (Reduced, Keen), "F(Q) → GK(r)";
    fk_to_g => (Keen, PairDistribution), "FK(Q) → g(r)";
    fk_to_big_g => (Keen, Reduced), "FK(Q) → G(r)";
    fk_to_gk => (Keen, Keen), "FK(Q) → GK(r)";
    dcs_to_g => (CrossSection, PairDistribution), "DCS(Q) → g(r)";
    dcs_to_big_g => (CrossSection, Reduced), "DCS(Q) → G(r)";
    dcs_to_gk => (CrossSection, Keen), "DCS(Q) → GK(r)";
}

real_to_reciprocal_ops! {
    g_to_s => (PairDistribution, Structure), "g(r) → S(Q)";
    g_to_f => (PairDistribution, Reduced), "g(r) → F(Q)";
    g_to_fk => (PairDistribution, Keen), "g(r) → FK(Q)";
    g_to_dcs => (PairDistribution, CrossSection), "g(r) → DCS(Q)";
    big_g_to_s => (Reduced, Structure), "G(r) → S(Q)";
    big_g_to_f => (Reduced, Reduced), "G(r) → F(Q)";
    big_g_to_fk => (Reduced, Keen), "G(r) → FK(Q)";
    big_g_to_dcs => (Reduced, CrossSection), "G(r) → DCS(Q)";
    gk_to_s => (Keen, Structure), "GK(r) → S(Q)";
    gk_to_f => (Keen, Reduced), "GK(r) → F(Q)";
    gk_to_fk => (Keen, Keen), "GK(r) → FK(Q)";
    gk_to_dcs => (Keen, CrossSection), "GK(r) → DCS(Q)";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StogError;
    use crate::models::TransformOptions;
    use crate::transform::transformer::{apply_cropping, linspace, low_x_term};

    fn params() -> ScatteringParams {
        ScatteringParams::new()
            .with_rho(0.0213)
            .with_bcoh_sqrd(3.644)
            .with_btot_sqrd(5.5)
    }

    fn transformer() -> Transformer {
        Transformer::new(params(), TransformOptions::default())
    }

    fn structure_factor(q: f64) -> f64 {
        1.0 + (-(q - 5.0) * (q - 5.0)).exp() * (2.0 * q).cos()
    }

    fn q_grid() -> Vec<f64> {
        linspace(0.5, 15.0, 291)
    }

    fn r_grid() -> Vec<f64> {
        (1..=1000).map(|i| 0.02 * i as f64).collect()
    }

    #[test]
    fn test_round_trip_all_pairs() {
        let t = transformer();
        let q = q_grid();
        let sq: Vec<f64> = q.iter().map(|&q| structure_factor(q)).collect();
        let r = r_grid();

        for from in ReciprocalKind::ALL {
            let values = from.from_structure(&q, &sq, t.params()).unwrap();
            for to in RealKind::ALL {
                let real = t.reciprocal_to_real(&q, &values, from, &r, to).unwrap();
                let back = t
                    .real_to_reciprocal(real.x(), real.y(), to, &q, from)
                    .unwrap();

                // 回到规范形式后与解析 S(Q) 比较
                let back_sq = from.to_structure(back.x(), back.y(), t.params()).unwrap();
                for (q, s) in back.x().iter().zip(&back_sq) {
                    assert!(
                        (s - structure_factor(*q)).abs() < 1e-3,
                        "{} -> {} at Q = {}: {} vs {}",
                        from,
                        to,
                        q,
                        s,
                        structure_factor(*q)
                    );
                }
            }
        }
    }

    #[test]
    fn test_named_ops_match_generic() {
        let t = transformer();
        let q = q_grid();
        let sq: Vec<f64> = q.iter().map(|&q| structure_factor(q)).collect();
        let r = r_grid();

        let named = t.s_to_gk(&q, &sq, &r).unwrap();
        let generic = t
            .reciprocal_to_real(&q, &sq, ReciprocalKind::Structure, &r, RealKind::Keen)
            .unwrap();
        assert_eq!(named, generic);

        let back = t.gk_to_dcs(named.x(), named.y(), &q).unwrap();
        let generic = t
            .real_to_reciprocal(named.x(), named.y(), RealKind::Keen, &q, ReciprocalKind::CrossSection)
            .unwrap();
        assert_eq!(back, generic);
    }

    #[test]
    fn test_first_peak_scenario() {
        // 类液氩 g(r)：第一峰位于 3.8 Å，峰高约 2.6
        let rho = 0.0213;
        let t = Transformer::new(
            ScatteringParams::new().with_rho(rho).with_bcoh_sqrd(1.0),
            TransformOptions::default(),
        );
        let g_model = |r: f64| {
            let h = 1.0 / (1.0 + (-(r - 3.4) / 0.08).exp());
            h * (1.0 + 1.6 * (-(r - 3.8) * (r - 3.8) / 0.125).exp()
                - 0.3 * (-(r - 5.3) * (r - 5.3) / 0.5).exp())
        };
        let r = r_grid();
        let gr: Vec<f64> = r.iter().map(|&r| g_model(r)).collect();
        let q: Vec<f64> = (0..495).map(|i| 0.3 + 0.05 * i as f64).collect();

        let sq = t.g_to_s(&r, &gr, &q).unwrap();
        let measured = crate::transform::transformer::apply_cropping(sq.x(), sq.y(), 0.5, 25.0).unwrap();
        let g_back = t.s_to_g(measured.x(), measured.y(), &r).unwrap();

        let (peak_r, peak_g) = g_back
            .points()
            .filter(|(r, _)| (3.0..=5.0).contains(r))
            .fold((0.0, f64::NEG_INFINITY), |acc, p| if p.1 > acc.1 { p } else { acc });
        assert!((peak_r - 3.8).abs() <= 0.2 * 3.8, "peak at {}", peak_r);
        assert!((peak_g - 2.6).abs() <= 0.2 * 2.6, "peak height {}", peak_g);
    }

    #[test]
    fn test_same_space_conversion() {
        let t = transformer();
        let q = [1.0, 2.0, 4.0];
        let sq = [0.5, 1.5, 1.0];
        let fk = t
            .convert_by_label(&q, &sq, "S(Q)", &[], "FK(Q)")
            .unwrap();
        assert_eq!(fk.x(), &q);
        assert!((fk.y()[1] - 0.5 * 3.644).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_kind_yields_no_output() {
        let t = transformer();
        let result = t.convert_by_label(&[1.0, 2.0], &[1.0, 1.0], "X(Q)", &[1.0, 2.0], "g(r)");
        assert!(matches!(result, Err(StogError::UnknownFunctionKind(ref s)) if s == "X(Q)"));
    }

    #[test]
    fn test_missing_density_raised_before_transform() {
        let t = Transformer::new(ScatteringParams::new(), TransformOptions::default());
        let q = q_grid();
        let sq: Vec<f64> = q.iter().map(|&q| structure_factor(q)).collect();
        let err = t.s_to_g(&q, &sq, &r_grid()).unwrap_err();
        assert!(err.is_configuration_error());
        // G(r) 不依赖密度
        assert!(t.s_to_big_g(&q, &sq, &r_grid()).is_ok());
    }

    fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
    }

    #[test]
    fn test_low_q_correction_recovers_cropped_range() {
        // S(Q) = 1 - exp(-Q) 在低 Q 近似线性趋于 0
        let q_full = linspace(0.02, 20.0, 1000);
        let sq_full: Vec<f64> = q_full.iter().map(|&q| 1.0 - (-q).exp()).collect();
        let cropped = apply_cropping(&q_full, &sq_full, 1.2, 20.0).unwrap();
        let r = r_grid();

        let plain_t = transformer();
        let corrected_t =
            plain_t.with_options(TransformOptions::default().with_low_x_correction(true));

        let full = plain_t.s_to_big_g(&q_full, &sq_full, &r).unwrap();
        let plain = plain_t.s_to_big_g(cropped.x(), cropped.y(), &r).unwrap();
        let corrected = corrected_t.s_to_big_g(cropped.x(), cropped.y(), &r).unwrap();
        assert_eq!(plain.x(), full.x());
        assert_eq!(corrected.x(), full.x());

        let err_plain = l2_distance(plain.y(), full.y());
        let err_corrected = l2_distance(corrected.y(), full.y());
        assert!(
            err_corrected < 0.5 * err_plain,
            "L2 error {} uncorrected vs {} corrected",
            err_plain,
            err_corrected
        );

        // 修正只在 2/π 缩放之后加一次，取 S(Qmin)
        let (q_min, s_min) = (cropped.x()[0], cropped.y()[0]);
        for ((r, g), g_plain) in corrected.points().zip(plain.y()) {
            let expected = low_x_term(q_min, s_min, r);
            assert!(
                (g - g_plain - expected).abs() < 1e-9,
                "r = {}: {} vs {}",
                r,
                g - g_plain,
                expected
            );
        }
    }
}
