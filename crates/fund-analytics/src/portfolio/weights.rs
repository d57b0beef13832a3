//! 포트폴리오 비중 배분
//!
//! 펀드 이름 → 비중(소수) 목록을 순서대로 보관합니다.
//! 비중은 0 이상이며 합계가 1.0 ± [`WEIGHT_SUM_TOLERANCE`] 이어야 합니다.

use std::collections::BTreeMap;

use fund_core::{FundError, FundResult};
use serde::{Deserialize, Serialize};

/// 비중 합계 허용 오차
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 검증된 포트폴리오 비중.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPortfolioWeights")]
pub struct PortfolioWeights {
    entries: Vec<(String, f64)>,
}

#[derive(Deserialize)]
struct RawPortfolioWeights {
    entries: Vec<(String, f64)>,
}

impl TryFrom<RawPortfolioWeights> for PortfolioWeights {
    type Error = FundError;

    fn try_from(raw: RawPortfolioWeights) -> FundResult<Self> {
        Self::new(raw.entries)
    }
}

impl PortfolioWeights {
    /// (이름, 소수 비중) 목록으로 비중을 생성합니다.
    pub fn new(entries: Vec<(String, f64)>) -> FundResult<Self> {
        validate_entries(entries.iter().map(|(n, w)| (n.as_str(), *w)))?;

        let mut seen = std::collections::HashSet::new();
        if let Some((name, _)) = entries.iter().find(|(n, _)| !seen.insert(n.as_str())) {
            return Err(FundError::invalid_input(format!("중복된 비중 항목: {}", name)));
        }

        Ok(Self { entries })
    }

    /// (이름, 백분율) 목록으로 비중을 생성합니다. 50.0 → 0.5
    pub fn from_percentages<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, f64)>,
    ) -> FundResult<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, pct)| (name.into(), pct / 100.0))
                .collect(),
        )
    }

    /// 정수 백분율로 균등 배분합니다.
    ///
    /// 마지막 펀드를 제외한 각 펀드는 `min(잔여, 100 / n)`%를 받고,
    /// 마지막 펀드가 잔여분을 모두 받으므로 합계는 항상 100%입니다.
    ///
    /// 예: 3개 펀드 → 33%, 33%, 34%
    pub fn equal_split<S: AsRef<str>>(names: &[S]) -> FundResult<Self> {
        if names.is_empty() {
            return Err(FundError::invalid_input("최소 1개의 펀드를 선택해야 합니다"));
        }

        let share = 100 / names.len() as u32;
        let mut remaining: u32 = 100;
        let mut pairs = Vec::with_capacity(names.len());

        for (i, name) in names.iter().enumerate() {
            let pct = if i == names.len() - 1 {
                remaining
            } else {
                remaining.min(share)
            };
            remaining -= pct;
            pairs.push((name.as_ref().to_string(), f64::from(pct)));
        }

        Self::from_percentages(pairs)
    }

    /// 펀드의 비중을 반환합니다.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    /// (이름, 비중) 순회.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, w)| (n.as_str(), *w))
    }

    /// 펀드 이름 목록.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// 항목 수.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 항목이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 이름 → 비중 맵으로 변환합니다.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries.iter().cloned().collect()
    }
}

/// 비중 값들을 검증합니다: 비어 있지 않고, 유한한 0 이상 값이며, 합계가 1.0.
pub fn validate_entries<'a>(entries: impl Iterator<Item = (&'a str, f64)>) -> FundResult<()> {
    let mut sum = 0.0;
    let mut count = 0;

    for (name, weight) in entries {
        if !weight.is_finite() || weight < 0.0 {
            return Err(FundError::invalid_input(format!(
                "{}: 비중은 0 이상이어야 합니다 ({})",
                name, weight
            )));
        }
        sum += weight;
        count += 1;
    }

    if count == 0 {
        return Err(FundError::invalid_input("비중이 비어 있습니다"));
    }

    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(FundError::invalid_input(format!(
            "비중 합계가 1.0 이 아닙니다 ({:.6})",
            sum
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_split_three_funds() {
        let w = PortfolioWeights::equal_split(&["A", "B", "C"]).unwrap();

        assert_eq!(w.get("A"), Some(0.33));
        assert_eq!(w.get("B"), Some(0.33));
        assert_eq!(w.get("C"), Some(0.34));
        assert_eq!(w.names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_equal_split_single_fund() {
        let w = PortfolioWeights::equal_split(&["Only"]).unwrap();
        assert_eq!(w.get("Only"), Some(1.0));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_equal_split_seven_funds_sums_to_one() {
        let names: Vec<String> = (0..7).map(|i| format!("F{}", i)).collect();
        let w = PortfolioWeights::equal_split(&names).unwrap();

        let sum: f64 = w.iter().map(|(_, v)| v).sum();
        assert!((sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert_eq!(w.get("F6"), Some(0.16));
    }

    #[test]
    fn test_equal_split_empty_rejected() {
        let names: [&str; 0] = [];
        assert!(PortfolioWeights::equal_split(&names).is_err());
    }

    #[test]
    fn test_from_percentages() {
        let w = PortfolioWeights::from_percentages([("A", 60.0), ("B", 40.0)]).unwrap();
        assert_eq!(w.get("A"), Some(0.6));
        assert_eq!(w.get("Z"), None);
        assert_eq!(w.to_map().len(), 2);
    }

    #[test]
    fn test_rejects_bad_sum() {
        let err = PortfolioWeights::from_percentages([("A", 40.0), ("B", 40.0)]).unwrap_err();
        assert!(matches!(err, FundError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_negative_and_duplicates() {
        assert!(PortfolioWeights::new(vec![("A".into(), 1.5), ("B".into(), -0.5)]).is_err());
        assert!(PortfolioWeights::new(vec![("A".into(), 0.5), ("A".into(), 0.5)]).is_err());
        assert!(PortfolioWeights::new(vec![]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let w: PortfolioWeights =
            serde_json::from_str(r#"{"entries":[["A",0.6],["B",0.4]]}"#).unwrap();
        assert_eq!(w.get("B"), Some(0.4));

        assert!(serde_json::from_str::<PortfolioWeights>(r#"{"entries":[["A",0.5],["B",0.3]]}"#)
            .is_err());
        assert!(serde_json::from_str::<PortfolioWeights>(r#"{"entries":[]}"#).is_err());
        assert!(
            serde_json::from_str::<PortfolioWeights>(r#"{"entries":[["A",0.5],["A",0.5]]}"#)
                .is_err()
        );
    }

    #[test]
    fn test_tolerance() {
        assert!(PortfolioWeights::new(vec![("A".into(), 0.5), ("B".into(), 0.5000005)]).is_ok());
        assert!(PortfolioWeights::new(vec![("A".into(), 0.5), ("B".into(), 0.50001)]).is_err());
    }
}
