//! 성과 분석 모듈
//!
//! - [`metrics`]: 위험/수익 지표 계산 (샤프 비율, 최대 낙폭, 칼마 비율, 승률 등)

pub mod metrics;

pub use metrics::*;
