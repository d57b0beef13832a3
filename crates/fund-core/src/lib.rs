//! # Fund Core
//!
//! 펀드 분석 시스템의 핵심 도메인 타입을 제공합니다:
//! - 가격 시계열 및 가격표 CSV 입출력
//! - 시뮬레이션용 펀드 프로파일
//! - 설정 관리
//! - 로깅 인프라
//! - 에러 타입

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use crate::config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
