//! 펀드 위험/수익 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 위험/수익 지표 계산
//! - 포트폴리오 합성 (비중, 낙폭, 차트)
//! - 펀드 간 상관행렬
//! - 시드 기반 가격 시뮬레이션
//! - 대시보드 리포트
//!
//! # Re-exports
//!
//! - [`performance`]: 지표 계산 (MetricsResult, compute_metrics 등)
//! - [`portfolio`]: 포트폴리오 분석 (PortfolioWeights, aggregate, DrawdownRanking 등)

pub mod correlation;
pub mod performance;
pub mod portfolio;
pub mod report;
pub mod simulation;

// Performance 모듈 re-exports
pub use performance::metrics::{
    compute_metrics, format_pct, format_ratio, MetricsResult, DEFAULT_RISK_FREE_RATE,
    TRADING_DAYS_PER_YEAR,
};

// Portfolio 모듈 re-exports
pub use portfolio::aggregate::{aggregate, aggregate_series};
pub use portfolio::charts::{ChartPoint, ChartSeries, PortfolioCharts, RiskReturnPoint};
pub use portfolio::drawdown::{drawdown_series, DrawdownEntry, DrawdownRanking, DrawdownSeverity};
pub use portfolio::weights::{PortfolioWeights, WEIGHT_SUM_TOLERANCE};

pub use correlation::{calculate_correlation, calculate_correlation_matrix, CorrelationMatrix};
pub use report::{FundReport, MetricsRow, PortfolioSummary, PORTFOLIO_NAME};
pub use simulation::FundSimulator;
