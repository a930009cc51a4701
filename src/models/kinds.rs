//! # 函数类型标签
//!
//! 倒空间：S(Q), F(Q), FK(Q), DCS(Q)
//! 实空间：g(r), G(r), GK(r)
//!
//! 标签字符串区分大小写（`g(r)` 与 `G(r)` 是不同的函数）。
//!
//! ## 依赖关系
//! - 被 `transform/`, `stog/`, `cli/` 使用

use crate::error::{Result, StogError};

use std::fmt;
use std::str::FromStr;

/// 倒空间函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReciprocalKind {
    /// S(Q)，结构因子（倒空间规范形式）
    Structure,
    /// F(Q) = Q[S(Q) - 1]
    Reduced,
    /// FK(Q) = ⟨b_coh⟩²[S(Q) - 1]，Keen 归一化
    Keen,
    /// DCS(Q) = ⟨b_coh⟩²[S(Q) - 1] + ⟨b_tot²⟩，微分散射截面
    CrossSection,
}

/// 实空间函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealKind {
    /// g(r)，对分布函数
    PairDistribution,
    /// G(r) = 4πρr[g(r) - 1]（实空间规范形式）
    Reduced,
    /// GK(r) = ⟨b_coh⟩²[g(r) - 1]，Keen 归一化
    Keen,
}

/// 任一空间的函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Reciprocal(ReciprocalKind),
    Real(RealKind),
}

impl ReciprocalKind {
    pub const ALL: [ReciprocalKind; 4] = [
        ReciprocalKind::Structure,
        ReciprocalKind::Reduced,
        ReciprocalKind::Keen,
        ReciprocalKind::CrossSection,
    ];

    /// 标签字符串
    pub fn label(&self) -> &'static str {
        match self {
            ReciprocalKind::Structure => "S(Q)",
            ReciprocalKind::Reduced => "F(Q)",
            ReciprocalKind::Keen => "FK(Q)",
            ReciprocalKind::CrossSection => "DCS(Q)",
        }
    }
}

impl RealKind {
    pub const ALL: [RealKind; 3] = [RealKind::PairDistribution, RealKind::Reduced, RealKind::Keen];

    /// 标签字符串
    pub fn label(&self) -> &'static str {
        match self {
            RealKind::PairDistribution => "g(r)",
            RealKind::Reduced => "G(r)",
            RealKind::Keen => "GK(r)",
        }
    }
}

impl FunctionKind {
    pub fn label(&self) -> &'static str {
        match self {
            FunctionKind::Reciprocal(kind) => kind.label(),
            FunctionKind::Real(kind) => kind.label(),
        }
    }
}

impl FromStr for ReciprocalKind {
    type Err = StogError;

    fn from_str(s: &str) -> Result<Self> {
        ReciprocalKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s.trim())
            .ok_or_else(|| StogError::UnknownFunctionKind(s.to_string()))
    }
}

impl FromStr for RealKind {
    type Err = StogError;

    fn from_str(s: &str) -> Result<Self> {
        RealKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s.trim())
            .ok_or_else(|| StogError::UnknownFunctionKind(s.to_string()))
    }
}

impl FromStr for FunctionKind {
    type Err = StogError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(kind) = s.parse::<ReciprocalKind>() {
            return Ok(FunctionKind::Reciprocal(kind));
        }
        s.parse::<RealKind>()
            .map(FunctionKind::Real)
            .map_err(|_| StogError::UnknownFunctionKind(s.to_string()))
    }
}

impl fmt::Display for ReciprocalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for RealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_round_trip() {
        for kind in ReciprocalKind::ALL {
            assert_eq!(kind.label().parse::<ReciprocalKind>().unwrap(), kind);
        }
        for kind in RealKind::ALL {
            assert_eq!(kind.label().parse::<RealKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("g(r)".parse::<RealKind>().unwrap(), RealKind::PairDistribution);
        assert_eq!("G(r)".parse::<RealKind>().unwrap(), RealKind::Reduced);
        assert!("s(q)".parse::<ReciprocalKind>().is_err());
    }

    #[test]
    fn test_unknown_kind() {
        let err = "D(r)".parse::<FunctionKind>().unwrap_err();
        assert!(matches!(err, StogError::UnknownFunctionKind(ref s) if s == "D(r)"));
        assert!("G(r)".parse::<ReciprocalKind>().is_err());
    }

    #[test]
    fn test_function_kind_dispatch() {
        assert_eq!(
            "DCS(Q)".parse::<FunctionKind>().unwrap(),
            FunctionKind::Reciprocal(ReciprocalKind::CrossSection)
        );
        assert_eq!(
            "GK(r)".parse::<FunctionKind>().unwrap(),
            FunctionKind::Real(RealKind::Keen)
        );
    }
}
