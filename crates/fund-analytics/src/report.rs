//! 포트폴리오 대시보드 리포트
//!
//! 구성 펀드 시계열과 비중으로부터 대시보드에 필요한 모든 데이터를 한 번에 만듭니다:
//! 펀드별/포트폴리오 지표, 차트 데이터, 상관행렬, 낙폭 순위, 요약.

use fund_core::{FundError, FundResult, PriceSeries};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::correlation::{calculate_correlation_matrix, CorrelationMatrix};
use crate::performance::metrics::MetricsResult;
use crate::portfolio::{aggregate_series, DrawdownRanking, PortfolioCharts, PortfolioWeights};

/// 합성 포트폴리오 시계열 이름
pub const PORTFOLIO_NAME: &str = "Portfolio";

/// 지표 표의 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    /// 펀드 또는 포트폴리오 이름
    pub name: String,
    /// 계산된 지표
    pub metrics: MetricsResult,
}

/// 포트폴리오 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// 구성 펀드 수
    pub fund_count: usize,
    /// 포트폴리오 누적 수익률
    pub cumulative_return: f64,
    /// 포트폴리오 최대 낙폭
    pub max_drawdown: f64,
}

/// 대시보드 리포트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundReport {
    /// 사용된 연간 무위험 이자율
    pub risk_free_rate: f64,
    /// 포트폴리오 비중
    pub weights: PortfolioWeights,
    /// 펀드별 지표 (입력 순서) 후 포트폴리오 지표
    pub metrics: Vec<MetricsRow>,
    /// 차트 데이터 (펀드 + 포트폴리오)
    pub charts: PortfolioCharts,
    /// 구성 펀드 간 상관행렬 (가격이 3개 미만이면 없음)
    pub correlation: Option<CorrelationMatrix>,
    /// 최대 낙폭 순위 (펀드 + 포트폴리오)
    pub drawdowns: DrawdownRanking,
    /// 포트폴리오 요약
    pub summary: PortfolioSummary,
}

impl FundReport {
    /// 리포트를 생성합니다.
    ///
    /// # 에러
    ///
    /// 시계열 정렬 불일치, 잘못된 비중, 가격 2개 미만, 합성 포트폴리오와
    /// 같은 이름(`PORTFOLIO_NAME`)의 구성 펀드 등 입력 오류는
    /// `FundError::InvalidInput`.
    pub fn build(
        series: &[PriceSeries],
        weights: &PortfolioWeights,
        risk_free_rate: f64,
    ) -> FundResult<Self> {
        if series.is_empty() {
            return Err(FundError::invalid_input("리포트를 생성할 펀드가 없습니다"));
        }
        if series.iter().any(|s| s.name() == PORTFOLIO_NAME) {
            return Err(FundError::invalid_input(format!(
                "구성 펀드 이름으로 '{}' 는 사용할 수 없습니다",
                PORTFOLIO_NAME
            )));
        }

        let portfolio = aggregate_series(series, weights, PORTFOLIO_NAME)?;

        let all: Vec<&PriceSeries> = series.iter().chain(std::iter::once(&portfolio)).collect();

        let metrics = all
            .iter()
            .map(|s| {
                Ok(MetricsRow {
                    name: s.name().to_string(),
                    metrics: MetricsResult::from_series(s, risk_free_rate)?,
                })
            })
            .collect::<FundResult<Vec<_>>>()?;

        let results: Vec<MetricsResult> = metrics.iter().map(|row| row.metrics).collect();
        let charts = PortfolioCharts::build(&all, &results);

        let correlation = if portfolio.len() >= 3 {
            Some(calculate_correlation_matrix(series)?)
        } else {
            None
        };

        let drawdowns = DrawdownRanking::from_series(all.iter().copied());

        let portfolio_metrics = results[results.len() - 1];
        let summary = PortfolioSummary {
            fund_count: series.len(),
            cumulative_return: portfolio_metrics.cumulative_return,
            max_drawdown: portfolio_metrics.max_drawdown,
        };

        info!(
            funds = series.len(),
            periods = portfolio.len(),
            cumulative_return = summary.cumulative_return,
            max_drawdown = summary.max_drawdown,
            "Built fund report"
        );

        Ok(Self {
            risk_free_rate,
            weights: weights.clone(),
            metrics,
            charts,
            correlation,
            drawdowns,
            summary,
        })
    }

    /// 포트폴리오 지표.
    pub fn portfolio_metrics(&self) -> Option<&MetricsResult> {
        self.row(PORTFOLIO_NAME)
    }

    /// 이름으로 지표를 찾습니다.
    pub fn row(&self, name: &str) -> Option<&MetricsResult> {
        self.metrics
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.metrics)
    }
}
