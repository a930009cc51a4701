//! # 逐点代数转换
//!
//! 同一空间内各函数形式之间的仿射关系。不重采样，不积分，
//! 输出与输入共享同一定义域。
//!
//! ## 倒空间（规范形式 S(Q)）
//! - `F(Q)  = Q[S(Q) - 1]`
//! - `FK(Q) = ⟨b_coh⟩²[S(Q) - 1]`
//! - `DCS(Q) = ⟨b_coh⟩²[S(Q) - 1] + ⟨b_tot²⟩`
//!
//! ## 实空间（规范形式 G(r)）
//! - `G(r)  = 4πρr[g(r) - 1]`
//! - `GK(r) = ⟨b_coh⟩²[g(r) - 1] = ⟨b_coh⟩² G(r) / (4πρr)`
//!
//! ## 依赖关系
//! - 被 `transform/matrix.rs`, `stog/merge.rs` 使用
//! - 使用 `models/params.rs`

use crate::error::{Result, StogError};
use crate::models::ScatteringParams;

use std::f64::consts::PI;

// ─────────────────────────────────────────────────────────────
// 倒空间
// ─────────────────────────────────────────────────────────────

/// F(Q) → S(Q)：`S = F/Q + 1`，Q = 0 处未定义
pub fn f_to_s(q: &[f64], fq: &[f64]) -> Result<Vec<f64>> {
    check_nonzero("Q", q)?;
    pointwise(q, fq, |q, f| f / q + 1.0)
}

/// S(Q) → F(Q)：`F = Q(S - 1)`
pub fn s_to_f(q: &[f64], sq: &[f64]) -> Result<Vec<f64>> {
    pointwise(q, sq, |q, s| q * (s - 1.0))
}

/// FK(Q) → S(Q)：`S = FK/⟨b_coh⟩² + 1`
pub fn fk_to_s(q: &[f64], fq_keen: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let bcoh_sqrd = params.bcoh_sqrd()?;
    pointwise(q, fq_keen, |_, fk| fk / bcoh_sqrd + 1.0)
}

/// S(Q) → FK(Q)
pub fn s_to_fk(q: &[f64], sq: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let bcoh_sqrd = params.bcoh_sqrd()?;
    pointwise(q, sq, |_, s| bcoh_sqrd * (s - 1.0))
}

/// DCS(Q) → S(Q)：`S = (DCS - ⟨b_tot²⟩)/⟨b_coh⟩² + 1`
pub fn dcs_to_s(q: &[f64], dcs: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let bcoh_sqrd = params.bcoh_sqrd()?;
    let btot_sqrd = params.btot_sqrd()?;
    pointwise(q, dcs, |_, d| (d - btot_sqrd) / bcoh_sqrd + 1.0)
}

/// S(Q) → DCS(Q)
pub fn s_to_dcs(q: &[f64], sq: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let bcoh_sqrd = params.bcoh_sqrd()?;
    let btot_sqrd = params.btot_sqrd()?;
    pointwise(q, sq, |_, s| bcoh_sqrd * (s - 1.0) + btot_sqrd)
}

// ─────────────────────────────────────────────────────────────
// 实空间
// ─────────────────────────────────────────────────────────────

/// g(r) → G(r)：`G = 4πρr(g - 1)`
pub fn g_to_big_g(r: &[f64], gr: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let factor = 4.0 * PI * params.rho()?;
    pointwise(r, gr, |r, g| factor * r * (g - 1.0))
}

/// G(r) → g(r)：`g = G/(4πρr) + 1`，r = 0 处未定义
pub fn big_g_to_g(r: &[f64], big_gr: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let factor = 4.0 * PI * params.rho()?;
    check_nonzero("r", r)?;
    pointwise(r, big_gr, |r, big_g| big_g / factor / r + 1.0)
}

/// GK(r) → G(r)：`G = (4πρ/⟨b_coh⟩²) r GK`
pub fn gk_to_big_g(r: &[f64], gk: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let factor = 4.0 * PI * params.rho()? / params.bcoh_sqrd()?;
    pointwise(r, gk, |r, k| factor * r * k)
}

/// G(r) → GK(r)：`GK = ⟨b_coh⟩²/(4πρ) · G/r`，r = 0 处未定义
pub fn big_g_to_gk(r: &[f64], big_gr: &[f64], params: &ScatteringParams) -> Result<Vec<f64>> {
    let factor = params.bcoh_sqrd()? / (4.0 * PI * params.rho()?);
    check_nonzero("r", r)?;
    pointwise(r, big_gr, |r, big_g| factor * big_g / r)
}

// ─────────────────────────────────────────────────────────────
// 内部工具
// ─────────────────────────────────────────────────────────────

fn pointwise<F>(x: &[f64], y: &[f64], f: F) -> Result<Vec<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    if x.len() != y.len() {
        return Err(StogError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(x.iter().zip(y).map(|(&x, &y)| f(x, y)).collect())
}

fn check_nonzero(axis: &'static str, x: &[f64]) -> Result<()> {
    match x.iter().position(|&v| v == 0.0) {
        Some(index) => Err(StogError::DivideByZero { axis, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScatteringParams {
        ScatteringParams::new()
            .with_rho(0.0213)
            .with_bcoh_sqrd(3.644)
            .with_btot_sqrd(5.5)
    }

    fn assert_all_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).abs() <= tol, "index {}: {} vs {}", i, x, y);
        }
    }

    #[test]
    fn test_f_to_s_inverse_of_s_to_f() {
        let q = [0.5, 1.0, 2.5, 10.0];
        let sq = [0.2, 1.7, 0.9, 1.01];
        let fq = s_to_f(&q, &sq).unwrap();
        assert_all_close(&fq, &[-0.4, 0.7, -0.25, 0.1], 1e-12);
        assert_all_close(&f_to_s(&q, &fq).unwrap(), &sq, 1e-12);
    }

    #[test]
    fn test_f_to_s_rejects_q_zero() {
        let err = f_to_s(&[0.0, 1.0], &[0.0, 0.5]).unwrap_err();
        assert!(matches!(err, StogError::DivideByZero { axis: "Q", index: 0 }));
    }

    #[test]
    fn test_keen_and_dcs_relations() {
        let q = [1.0, 2.0];
        let sq = [1.5, 0.5];
        let p = params();

        let fk = s_to_fk(&q, &sq, &p).unwrap();
        assert_all_close(&fk, &[0.5 * 3.644, -0.5 * 3.644], 1e-12);
        assert_all_close(&fk_to_s(&q, &fk, &p).unwrap(), &sq, 1e-12);

        let dcs = s_to_dcs(&q, &sq, &p).unwrap();
        assert_all_close(&dcs, &[0.5 * 3.644 + 5.5, -0.5 * 3.644 + 5.5], 1e-12);
        assert_all_close(&dcs_to_s(&q, &dcs, &p).unwrap(), &sq, 1e-12);
    }

    #[test]
    fn test_missing_bcoh_is_configuration_error() {
        let p = ScatteringParams::new().with_btot_sqrd(1.0);
        let err = fk_to_s(&[1.0], &[1.0], &p).unwrap_err();
        assert!(err.is_configuration_error());
        let err = dcs_to_s(&[1.0], &[1.0], &ScatteringParams::new().with_bcoh_sqrd(1.0))
            .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_real_space_relations() {
        let r = [0.5, 1.0, 3.0];
        let gr = [0.0, 0.8, 2.1];
        let p = params();

        let big_g = g_to_big_g(&r, &gr, &p).unwrap();
        let expected: Vec<f64> = r
            .iter()
            .zip(&gr)
            .map(|(r, g)| 4.0 * PI * 0.0213 * r * (g - 1.0))
            .collect();
        assert_all_close(&big_g, &expected, 1e-12);
        assert_all_close(&big_g_to_g(&r, &big_g, &p).unwrap(), &gr, 1e-12);

        // GK(r) = <b_coh>^2 [g(r) - 1]
        let gk = big_g_to_gk(&r, &big_g, &p).unwrap();
        let keen: Vec<f64> = gr.iter().map(|g| 3.644 * (g - 1.0)).collect();
        assert_all_close(&gk, &keen, 1e-12);
        assert_all_close(&gk_to_big_g(&r, &gk, &p).unwrap(), &big_g, 1e-12);
    }

    #[test]
    fn test_big_g_to_g_rejects_r_zero() {
        let err = big_g_to_g(&[0.0, 1.0], &[0.0, 0.0], &params()).unwrap_err();
        assert!(matches!(err, StogError::DivideByZero { axis: "r", .. }));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(s_to_f(&[1.0, 2.0], &[1.0]).unwrap_err().is_domain_error());
    }
}
