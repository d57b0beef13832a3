//! 가격 시계열 타입.
//!
//! 기간(일자)별 가격을 시간순으로 담는 불변 시계열입니다.
//! 첫 번째 값이 정규화 기준값이 됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FundError, FundResult};

/// 단일 기간의 가격.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 기간 표시 (일자)
    pub date: NaiveDate,
    /// 가격 (순자산가치), 항상 양수
    pub price: f64,
}

impl PricePoint {
    /// 새 가격 포인트를 생성합니다.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// 이름이 붙은 가격 시계열.
///
/// 생성 시점에 다음을 검증하며, 이후에는 변경되지 않습니다:
/// - 최소 1개 이상의 포인트
/// - 일자가 엄격하게 오름차순
/// - 모든 가격이 유한한 양수
///
/// 역직렬화도 [`PriceSeries::new`]를 거치므로 같은 검증이 적용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    name: String,
    points: Vec<PricePoint>,
}

/// 검증 전 역직렬화 형태.
#[derive(Deserialize)]
struct RawPriceSeries {
    name: String,
    points: Vec<PricePoint>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = FundError;

    fn try_from(raw: RawPriceSeries) -> FundResult<Self> {
        Self::new(raw.name, raw.points)
    }
}

/// 기간 수익률 (`price[i] / price[i-1] - 1`)을 계산합니다. 길이 N-1.
pub fn period_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

impl PriceSeries {
    /// 검증된 가격 시계열을 생성합니다.
    pub fn new(name: impl Into<String>, points: Vec<PricePoint>) -> FundResult<Self> {
        let name = name.into();

        if points.is_empty() {
            return Err(FundError::invalid_input(format!(
                "{}: 가격 시계열이 비어 있습니다",
                name
            )));
        }

        for (i, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(FundError::invalid_input(format!(
                    "{}: {} 번째 가격이 양수가 아닙니다 ({})",
                    name, i, point.price
                )));
            }
        }

        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(FundError::invalid_input(format!(
                "{}: 일자가 오름차순이 아닙니다 ({} -> {})",
                name, w[0].date, w[1].date
            )));
        }

        Ok(Self { name, points })
    }

    /// 일자 목록과 가격 목록을 묶어 시계열을 생성합니다.
    pub fn from_parts(
        name: impl Into<String>,
        dates: &[NaiveDate],
        prices: &[f64],
    ) -> FundResult<Self> {
        let name = name.into();
        if dates.len() != prices.len() {
            return Err(FundError::invalid_input(format!(
                "{}: 일자 수({})와 가격 수({})가 다릅니다",
                name,
                dates.len(),
                prices.len()
            )));
        }

        let points = dates
            .iter()
            .zip(prices)
            .map(|(&date, &price)| PricePoint::new(date, price))
            .collect();

        Self::new(name, points)
    }

    /// 시계열 이름.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 모든 가격 포인트.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 가격 값만 추출합니다.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// 일자만 추출합니다.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// 기간 수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 생성자가 빈 시계열을 거부하므로 항상 false 입니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 정규화 기준값 (첫 번째 가격).
    pub fn first_price(&self) -> f64 {
        self.points[0].price
    }

    /// 마지막 가격.
    pub fn last_price(&self) -> f64 {
        self.points[self.points.len() - 1].price
    }

    /// 기간 수익률 (`price[i] / price[i-1] - 1`), 길이 N-1.
    pub fn period_returns(&self) -> Vec<f64> {
        period_returns(&self.prices())
    }

    /// 첫 번째 가격을 1.0으로 맞춘 정규화 시계열을 반환합니다.
    pub fn normalized(&self) -> PriceSeries {
        let base = self.first_price();
        PriceSeries {
            name: self.name.clone(),
            points: self
                .points
                .iter()
                .map(|p| PricePoint::new(p.date, p.price / base))
                .collect(),
        }
    }

    /// 다른 시계열과 기간 표시가 완전히 일치하는지 확인합니다.
    pub fn is_aligned_with(&self, other: &PriceSeries) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.date == b.date)
    }

    /// 이름만 바꾼 시계열을 반환합니다.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect()
    }

    #[test]
    fn test_series_basic_accessors() {
        let series = PriceSeries::from_parts("A", &dates(3), &[1.0, 1.2, 0.9]).unwrap();

        assert_eq!(series.name(), "A");
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_price(), 1.0);
        assert_eq!(series.last_price(), 0.9);
        assert_eq!(series.prices(), vec![1.0, 1.2, 0.9]);
    }

    #[test]
    fn test_period_returns() {
        let series = PriceSeries::from_parts("A", &dates(3), &[2.0, 3.0, 1.5]).unwrap();
        let returns = series.period_returns();

        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.5).abs() < 1e-12);
        assert!((returns[1] + 0.5).abs() < 1e-12);
        assert_eq!(returns, period_returns(&[2.0, 3.0, 1.5]));
        assert!(period_returns(&[1.0]).is_empty());
    }

    #[test]
    fn test_normalized_starts_at_one() {
        let series = PriceSeries::from_parts("A", &dates(3), &[2.0, 3.0, 1.0]).unwrap();
        let norm = series.normalized();

        assert_eq!(norm.prices(), vec![1.0, 1.5, 0.5]);
        assert_eq!(norm.dates(), series.dates());
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let err = PriceSeries::from_parts("A", &dates(3), &[1.0, 0.0, 1.0]).unwrap_err();
        assert!(matches!(err, FundError::InvalidInput(_)));

        let err = PriceSeries::from_parts("A", &dates(2), &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, FundError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let mut d = dates(3);
        d.swap(1, 2);
        let err = PriceSeries::from_parts("A", &d, &[1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, FundError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(PriceSeries::new("A", vec![]).is_err());
        assert!(PriceSeries::from_parts("A", &dates(2), &[1.0]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let series: PriceSeries = serde_json::from_str(
            r#"{"name":"A","points":[{"date":"2024-01-01","price":1.0},{"date":"2024-01-02","price":1.1}]}"#,
        )
        .unwrap();
        assert_eq!(series.len(), 2);

        assert!(serde_json::from_str::<PriceSeries>(r#"{"name":"A","points":[]}"#).is_err());
        assert!(serde_json::from_str::<PriceSeries>(
            r#"{"name":"A","points":[{"date":"2024-01-01","price":-1.0}]}"#
        )
        .is_err());
        assert!(serde_json::from_str::<PriceSeries>(
            r#"{"name":"A","points":[{"date":"2024-01-02","price":1.0},{"date":"2024-01-01","price":1.0}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_alignment() {
        let a = PriceSeries::from_parts("A", &dates(3), &[1.0, 1.0, 1.0]).unwrap();
        let b = PriceSeries::from_parts("B", &dates(3), &[2.0, 2.0, 2.0]).unwrap();
        let c = PriceSeries::from_parts("C", &dates(2), &[2.0, 2.0]).unwrap();

        assert!(a.is_aligned_with(&b));
        assert!(!a.is_aligned_with(&c));
    }
}
