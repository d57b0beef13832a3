//! 상관계수 계산 모듈.
//!
//! 펀드 간 일간 수익률의 상관관계를 계산합니다.
//! 상관관계가 낮을수록 포트폴리오 분산 효과가 큽니다.
//!
//! # 주요 기능
//!
//! - **Pearson 상관계수**: 두 수익률 시계열 간 선형 상관관계
//! - **상관행렬**: 여러 펀드 간 상관관계를 N×N 행렬로 표현
//!
//! # 예시
//!
//! ```rust
//! use fund_analytics::correlation::calculate_correlation;
//!
//! let returns_a = vec![0.01, -0.02, 0.015, 0.005];
//! let returns_b = vec![0.008, -0.015, 0.012, 0.003];
//!
//! let corr = calculate_correlation(&returns_a, &returns_b);
//! assert!(corr.unwrap() > 0.9);
//! ```

use fund_core::{FundError, FundResult, PriceSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 상관행렬 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// 펀드 목록 (행/열 순서)
    pub names: Vec<String>,
    /// 상관계수 행렬 (N×N, -1.0 ~ 1.0)
    pub matrix: Vec<Vec<f64>>,
    /// 분석 기간 (가격 데이터 길이)
    pub period: usize,
}

impl CorrelationMatrix {
    /// 두 펀드 간 상관계수를 조회합니다.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.matrix[i][j])
    }
}

/// Pearson 상관계수 계산.
///
/// # 반환
///
/// 상관계수 (-1.0 ~ 1.0). 길이가 다르거나 2개 미만이거나,
/// 한쪽 분산이 0이면 None.
pub fn calculate_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;

    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // 변동 없음
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// 가격 시계열 목록의 일간 수익률 상관행렬을 계산합니다.
///
/// 분산이 0인 시계열과의 상관계수는 0.0으로 표시하고, 대각선은 항상 1.0입니다.
///
/// # 에러
///
/// 시계열이 없거나, 길이가 서로 다르거나, 수익률이 2개 미만(가격 3개 미만)이면
/// `FundError::InvalidInput`.
pub fn calculate_correlation_matrix(series: &[PriceSeries]) -> FundResult<CorrelationMatrix> {
    let first = series
        .first()
        .ok_or_else(|| FundError::invalid_input("상관행렬을 계산할 시계열이 없습니다"))?;

    let period = first.len();
    if let Some(other) = series.iter().find(|s| s.len() != period) {
        return Err(FundError::invalid_input(format!(
            "{} 의 길이({})가 {} 의 길이({})와 다릅니다",
            other.name(),
            other.len(),
            first.name(),
            period
        )));
    }

    if period < 3 {
        return Err(FundError::invalid_input(format!(
            "상관계수 계산에는 최소 3개의 가격이 필요합니다 (현재 {}개)",
            period
        )));
    }

    let returns: Vec<Vec<f64>> = series.iter().map(PriceSeries::period_returns).collect();
    let n = series.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let corr = calculate_correlation(&returns[i], &returns[j]).unwrap_or(0.0);
            matrix[i][j] = corr;
            matrix[j][i] = corr;
        }
    }

    debug!(funds = n, period, "Computed correlation matrix");

    Ok(CorrelationMatrix {
        names: series.iter().map(|s| s.name().to_string()).collect(),
        matrix,
        period,
    })
}
