//! 포트폴리오 합성
//!
//! 여러 구성 펀드의 가격 시계열과 비중으로 포트폴리오 가격 시계열을 만듭니다:
//! `portfolio[i] = Σ weight[f] × price_f[i]`
//!
//! 결과는 그 자체로 유효한 가격 시계열이므로 지표 계산에 바로 사용할 수 있습니다.

use std::collections::BTreeMap;

use fund_core::{FundError, FundResult, PriceSeries};
use tracing::{debug, warn};

use super::weights::{validate_entries, PortfolioWeights};

/// 이름 → 가격 시계열, 이름 → 비중 맵으로 포트폴리오 가격을 계산합니다.
///
/// # 전제 조건
///
/// - 모든 시계열의 길이가 같고 비어 있지 않음
/// - 모든 가격이 유한한 양수
/// - 비중이 0 이상이며 합계가 1.0 ± 1e-6
/// - 비중이 지정된 모든 펀드가 `series_map`에 존재
///
/// 비중이 없는 시계열은 합성에 참여하지 않습니다 (비중 0).
///
/// # 에러
///
/// 위 조건을 위반하면 `FundError::InvalidInput`.
pub fn aggregate(
    series_map: &BTreeMap<String, Vec<f64>>,
    weights: &BTreeMap<String, f64>,
) -> FundResult<Vec<f64>> {
    if let Err(e) = validate_entries(weights.iter().map(|(n, w)| (n.as_str(), *w))) {
        warn!(error = %e, "Rejected portfolio weights");
        return Err(e);
    }

    let len = series_map
        .values()
        .next()
        .map(Vec::len)
        .ok_or_else(|| FundError::invalid_input("구성 시계열이 없습니다"))?;

    if len == 0 {
        return Err(FundError::invalid_input("구성 시계열이 비어 있습니다"));
    }

    for (name, prices) in series_map {
        if prices.len() != len {
            return Err(FundError::invalid_input(format!(
                "{}: 시계열 길이({})가 다른 시계열({})과 다릅니다",
                name,
                prices.len(),
                len
            )));
        }
        if let Some(p) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(FundError::invalid_input(format!(
                "{}: 양수가 아닌 가격이 있습니다 ({})",
                name, p
            )));
        }
    }

    let mut portfolio = vec![0.0; len];

    for (name, &weight) in weights {
        let prices = series_map.get(name).ok_or_else(|| {
            FundError::invalid_input(format!("비중이 지정된 펀드의 시계열이 없습니다: {}", name))
        })?;

        for (total, price) in portfolio.iter_mut().zip(prices) {
            *total += weight * price;
        }
    }

    debug!(
        constituents = weights.len(),
        periods = len,
        "Aggregated portfolio series"
    );

    Ok(portfolio)
}

/// 정렬된 가격 시계열 목록을 하나의 포트폴리오 시계열로 합성합니다.
///
/// 모든 시계열은 같은 기간 표시를 가져야 하며, 결과는 같은 일자를 사용합니다.
pub fn aggregate_series(
    series: &[PriceSeries],
    weights: &PortfolioWeights,
    name: impl Into<String>,
) -> FundResult<PriceSeries> {
    let first = series
        .first()
        .ok_or_else(|| FundError::invalid_input("구성 시계열이 없습니다"))?;

    if let Some(misaligned) = series.iter().find(|s| !first.is_aligned_with(s)) {
        return Err(FundError::invalid_input(format!(
            "{} 의 기간이 {} 과 일치하지 않습니다",
            misaligned.name(),
            first.name()
        )));
    }

    let mut series_map = BTreeMap::new();
    for s in series {
        if series_map
            .insert(s.name().to_string(), s.prices())
            .is_some()
        {
            return Err(FundError::invalid_input(format!(
                "중복된 시계열 이름: {}",
                s.name()
            )));
        }
    }

    let prices = aggregate(&series_map, &weights.to_map())?;
    PriceSeries::from_parts(name, &first.dates(), &prices)
}
