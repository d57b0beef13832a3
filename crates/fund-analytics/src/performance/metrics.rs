//! 위험/수익 지표 계산 모듈
//!
//! 시간순 가격 시계열과 연간 무위험 이자율로부터 다음 지표를 계산합니다:
//! - 누적 수익률 (Cumulative Return)
//! - 연율화 수익률 (Annualized Return)
//! - 연율화 변동성 (Annualized Volatility)
//! - 샤프 비율 (Sharpe Ratio)
//! - 최대 낙폭 (Maximum Drawdown)
//! - 칼마 비율 (Calmar Ratio)
//! - 승률 (Win Rate)
//!
//! 모든 계산은 순수 함수이며, 분모가 0이 되는 경우(변동성 0, 낙폭 0)는
//! 에러가 아니라 해당 비율을 0으로 정의합니다.
//!
//! # 사용 예시
//!
//! ```rust
//! use fund_analytics::performance::metrics::compute_metrics;
//!
//! let metrics = compute_metrics(&[1.0, 1.2, 0.9], 0.025).unwrap();
//! assert!((metrics.max_drawdown + 0.25).abs() < 1e-12);
//! ```

use fund_core::{FundError, FundResult, PriceSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use fund_core::period_returns;

/// 연간 거래일 수 (연율화 계산에 사용)
///
/// 모든 시계열을 일간 데이터로 간주하는 고정 파라미터입니다.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 기본 무위험 이자율 (연간, 0.025 = 2.5%)
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.025;

/// 표시 순서대로의 지표 레이블
pub const METRIC_LABELS: [&str; 7] = [
    "누적 수익률",
    "연율화 수익률",
    "연율화 변동성",
    "샤프 비율",
    "최대 낙폭",
    "칼마 비율",
    "일간 승률",
];

/// 위험/수익 지표 계산 결과
///
/// 하나의 가격 시계열과 하나의 무위험 이자율로 계산되며 이후 변경되지 않습니다.
/// 모든 수익률 값은 소수 (0.21 = 21%) 입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// 누적 수익률: `마지막 가격 / 첫 가격 - 1`
    pub cumulative_return: f64,

    /// 연율화 수익률: `(1 + 누적 수익률)^(252 / N) - 1`
    pub annualized_return: f64,

    /// 연율화 변동성: 기간 수익률 표본 표준편차 × √252
    pub annualized_volatility: f64,

    /// 샤프 비율: (연율화 수익률 - 무위험 이자율) / 연율화 변동성
    ///
    /// 변동성이 0이면 0입니다.
    pub sharpe_ratio: f64,

    /// 최대 낙폭: 고점 대비 하락률의 최솟값 (0 이하)
    pub max_drawdown: f64,

    /// 칼마 비율: 연율화 수익률 / |최대 낙폭|
    ///
    /// 낙폭이 0이면 0입니다.
    pub calmar_ratio: f64,

    /// 승률: 양의 기간 수익률 비율 (0 수익률은 패배로 집계)
    pub win_rate: f64,
}

impl MetricsResult {
    /// 가격 시계열에서 지표를 계산합니다.
    pub fn from_series(series: &PriceSeries, risk_free: f64) -> FundResult<Self> {
        let _span = fund_core::fund_span!("compute_metrics", series.name(), series.len()).entered();
        compute_metrics(&series.prices(), risk_free)
    }

    /// 화면 표시용 (레이블, 값) 목록을 반환합니다.
    ///
    /// 수익률/변동성/낙폭/승률은 백분율, 샤프/칼마는 소수 둘째 자리 비율로 표시합니다.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        let values = [
            format_pct(self.cumulative_return),
            format_pct(self.annualized_return),
            format_pct(self.annualized_volatility),
            format_ratio(self.sharpe_ratio),
            format_pct(self.max_drawdown),
            format_ratio(self.calmar_ratio),
            format_pct(self.win_rate),
        ];
        METRIC_LABELS.into_iter().zip(values).collect()
    }

    /// 성과 요약을 한 줄 문자열로 반환합니다.
    pub fn summary(&self) -> String {
        format!(
            "누적: {} | 연율화: {} | 변동성: {} | 샤프: {} | MDD: {} | 칼마: {} | 승률: {}",
            format_pct(self.cumulative_return),
            format_pct(self.annualized_return),
            format_pct(self.annualized_volatility),
            format_ratio(self.sharpe_ratio),
            format_pct(self.max_drawdown),
            format_ratio(self.calmar_ratio),
            format_pct(self.win_rate),
        )
    }
}

/// 소수를 소수 둘째 자리 백분율 문자열로 변환합니다 (0.1234 → "12.34%").
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// 비율을 소수 둘째 자리 문자열로 변환합니다.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// 가격 시계열과 무위험 이자율로 위험/수익 지표를 계산합니다.
///
/// # 매개변수
///
/// * `prices` - 기간별 가격 (시간순, N ≥ 2, 모두 양수)
/// * `risk_free` - 연간 무위험 이자율 (소수, 예: 0.025)
///
/// # 에러
///
/// N < 2 이거나 0 이하/비유한 가격이 있으면 `FundError::InvalidInput`.
pub fn compute_metrics(prices: &[f64], risk_free: f64) -> FundResult<MetricsResult> {
    validate_prices(prices)?;
    if !risk_free.is_finite() {
        return Err(FundError::invalid_input(format!(
            "무위험 이자율이 유한하지 않습니다: {}",
            risk_free
        )));
    }

    let n = prices.len();
    let returns = period_returns(prices);

    // === 수익률 ===
    let cumulative_return = prices[n - 1] / prices[0] - 1.0;
    let annualized_return = annualize_return(cumulative_return, n);

    // === 변동성 ===
    let annualized_volatility =
        sample_std_dev(&returns) * (TRADING_DAYS_PER_YEAR as f64).sqrt();

    // === 샤프 비율 ===
    let sharpe_ratio = if annualized_volatility > 0.0 {
        (annualized_return - risk_free) / annualized_volatility
    } else {
        0.0
    };

    // === 최대 낙폭 / 칼마 비율 ===
    let max_drawdown = max_drawdown(prices);
    let calmar_ratio = if max_drawdown < 0.0 {
        annualized_return / max_drawdown.abs()
    } else {
        0.0
    };

    // === 승률 ===
    let wins = returns.iter().filter(|&&r| r > 0.0).count();
    let win_rate = wins as f64 / returns.len() as f64;

    debug!(
        periods = n,
        cumulative_return,
        annualized_volatility,
        max_drawdown,
        "Computed metrics"
    );

    Ok(MetricsResult {
        cumulative_return,
        annualized_return,
        annualized_volatility,
        sharpe_ratio,
        max_drawdown,
        calmar_ratio,
        win_rate,
    })
}

/// 가격 시계열의 전제 조건을 확인합니다 (N ≥ 2, 모든 가격 > 0).
pub fn validate_prices(prices: &[f64]) -> FundResult<()> {
    if prices.len() < 2 {
        return Err(FundError::invalid_input(format!(
            "지표 계산에는 최소 2개의 가격이 필요합니다 (현재 {}개)",
            prices.len()
        )));
    }

    if let Some((i, p)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(FundError::invalid_input(format!(
            "{} 번째 가격이 양수가 아닙니다: {}",
            i, p
        )));
    }

    Ok(())
}

/// 누적 수익률을 연율화합니다.
///
/// 공식: `(1 + r)^(252 / periods) - 1`
pub fn annualize_return(cumulative_return: f64, periods: usize) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    (1.0 + cumulative_return).powf(TRADING_DAYS_PER_YEAR as f64 / periods as f64) - 1.0
}

/// 표본 표준편차 (분모 n-1).
///
/// 값이 2개 미만이면 분산을 정의할 수 없으므로 0을 반환합니다.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    variance.sqrt()
}

/// 가격 시계열에서 최대 낙폭(MDD)을 계산합니다.
///
/// 각 시점의 낙폭은 `(가격 - 누적 고점) / 누적 고점` 이며, 그 최솟값을 반환합니다.
/// 결과는 0 이하이고, 단조 비감소 시계열이면 0입니다.
///
/// # 예시
///
/// 1.0 → 1.2 (고점) → 0.9: MDD = (0.9 - 1.2) / 1.2 = -25%
pub fn max_drawdown(prices: &[f64]) -> f64 {
    let Some(&first) = prices.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0;

    for &price in prices {
        if price > peak {
            peak = price;
        }

        let drawdown = (price - peak) / peak;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}
