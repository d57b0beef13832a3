//! 포트폴리오 차트 데이터 구조
//!
//! 대시보드에서 사용할 차트 데이터를 생성합니다.
//!
//! # 제공 차트
//!
//! - 정규화 순자산가치 추이 (시작 = 1)
//! - 낙폭 추이
//! - 위험/수익 산점도 (연율화 변동성 vs 연율화 수익률)

use chrono::NaiveDate;
use fund_core::PriceSeries;
use serde::{Deserialize, Serialize};

use super::drawdown::drawdown_series;
use crate::performance::metrics::MetricsResult;

/// 차트 데이터 포인트
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X축 값 (기간 일자)
    pub x: NaiveDate,

    /// Y축 값
    pub y: f64,
}

/// 이름이 붙은 차트 선
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// 범례 이름
    pub name: String,
    /// 데이터 포인트 (시간순)
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// 정규화 순자산가치 선을 만듭니다.
    pub fn normalized(series: &PriceSeries) -> Self {
        let norm = series.normalized();
        Self {
            name: series.name().to_string(),
            points: norm
                .points()
                .iter()
                .map(|p| ChartPoint { x: p.date, y: p.price })
                .collect(),
        }
    }

    /// 낙폭 추이 선을 만듭니다.
    pub fn drawdown(series: &PriceSeries) -> Self {
        let drawdowns = drawdown_series(&series.prices());
        Self {
            name: series.name().to_string(),
            points: series
                .dates()
                .into_iter()
                .zip(drawdowns)
                .map(|(x, y)| ChartPoint { x, y })
                .collect(),
        }
    }
}

/// 위험/수익 산점도 포인트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnPoint {
    /// 시계열 이름
    pub name: String,
    /// 연율화 수익률 (Y축)
    pub annualized_return: f64,
    /// 연율화 변동성 (X축)
    pub annualized_volatility: f64,
}

impl RiskReturnPoint {
    /// 지표 결과에서 산점도 포인트를 만듭니다.
    pub fn from_metrics(name: impl Into<String>, metrics: &MetricsResult) -> Self {
        Self {
            name: name.into(),
            annualized_return: metrics.annualized_return,
            annualized_volatility: metrics.annualized_volatility,
        }
    }
}

/// 포트폴리오 차트 데이터 모음
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCharts {
    /// 정규화 순자산가치 추이
    pub nav_curves: Vec<ChartSeries>,

    /// 낙폭 추이
    pub drawdown_curves: Vec<ChartSeries>,

    /// 위험/수익 산점도
    pub risk_return: Vec<RiskReturnPoint>,
}

impl PortfolioCharts {
    /// 시계열과 해당 지표 목록에서 모든 차트 데이터를 생성합니다.
    ///
    /// `series` 와 `metrics` 는 같은 순서여야 합니다.
    pub fn build(series: &[&PriceSeries], metrics: &[MetricsResult]) -> Self {
        Self {
            nav_curves: series.iter().map(|s| ChartSeries::normalized(s)).collect(),
            drawdown_curves: series.iter().map(|s| ChartSeries::drawdown(s)).collect(),
            risk_return: series
                .iter()
                .zip(metrics)
                .map(|(s, m)| RiskReturnPoint::from_metrics(s.name(), m))
                .collect(),
        }
    }
}
