//! 포트폴리오 분석 모듈
//!
//! 여러 펀드를 비중에 따라 합성하고, 낙폭과 차트 데이터를 분석합니다.
//!
//! # 모듈 구성
//!
//! - [`weights`]: 비중 검증 및 균등 배분
//! - [`aggregate`]: 구성 펀드 가격의 가중 합성
//! - [`drawdown`]: 낙폭 곡선 및 최대 낙폭 순위
//! - [`charts`]: 차트 데이터 구조 (순자산가치, 낙폭, 위험/수익 산점도)
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use fund_analytics::portfolio::{aggregate_series, PortfolioWeights};
//!
//! let weights = PortfolioWeights::equal_split(&["CSI 300 Index A", "Bond Fund A"])?;
//! let portfolio = aggregate_series(&series, &weights, "Portfolio")?;
//! ```

pub mod aggregate;
pub mod charts;
pub mod drawdown;
pub mod weights;

pub use aggregate::*;
pub use charts::*;
pub use drawdown::*;
pub use weights::*;
