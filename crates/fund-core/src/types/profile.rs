//! 시뮬레이션용 펀드 프로파일.

use serde::{Deserialize, Serialize};

use crate::error::{FundError, FundResult};

/// 일간 수익률 분포로 정의되는 펀드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundProfile {
    /// 펀드 이름
    pub name: String,
    /// 일간 수익률 평균
    pub mean: f64,
    /// 일간 수익률 표준편차
    pub volatility: f64,
}

impl FundProfile {
    /// 새 프로파일을 생성합니다.
    pub fn new(name: impl Into<String>, mean: f64, volatility: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            volatility,
        }
    }

    /// 분포 파라미터가 유효한지 확인합니다.
    pub fn validate(&self) -> FundResult<()> {
        if self.name.trim().is_empty() {
            return Err(FundError::invalid_input("펀드 이름이 비어 있습니다"));
        }
        if !self.mean.is_finite() {
            return Err(FundError::invalid_input(format!(
                "{}: 평균 수익률이 유한하지 않습니다",
                self.name
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(FundError::invalid_input(format!(
                "{}: 변동성은 0 이상이어야 합니다 ({})",
                self.name, self.volatility
            )));
        }
        Ok(())
    }
}

/// 기본 펀드 풀 (7종).
pub fn default_fund_pool() -> Vec<FundProfile> {
    vec![
        FundProfile::new("CSI 300 Index A", 0.0003, 0.015),
        FundProfile::new("CSI 500 Index A", 0.0004, 0.018),
        FundProfile::new("ChiNext Index A", 0.0005, 0.022),
        FundProfile::new("Bond Fund A", 0.0001, 0.003),
        FundProfile::new("Money Market Fund A", 0.00008, 0.0005),
        FundProfile::new("Gold ETF", 0.0002, 0.012),
        FundProfile::new("Nasdaq Index", 0.0004, 0.016),
    ]
}

/// 기본 선택 펀드 (주식 지수, 채권, 머니마켓).
pub fn default_selection() -> Vec<String> {
    vec![
        "CSI 300 Index A".to_string(),
        "Bond Fund A".to_string(),
        "Money Market Fund A".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_is_valid() {
        let pool = default_fund_pool();
        assert_eq!(pool.len(), 7);
        assert!(pool.iter().all(|p| p.validate().is_ok()));

        for name in default_selection() {
            assert!(pool.iter().any(|p| p.name == name));
        }
    }

    #[test]
    fn test_validate_rejects_negative_volatility() {
        let profile = FundProfile::new("X", 0.0, -0.01);
        assert!(profile.validate().is_err());

        let profile = FundProfile::new(" ", 0.0, 0.01);
        assert!(profile.validate().is_err());
    }
}
