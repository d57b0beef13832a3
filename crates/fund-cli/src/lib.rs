//! 펀드 분석 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 펀드 풀 조회
//! - 시뮬레이션 가격표 생성
//! - 가격표 지표 계산
//! - 포트폴리오 분석 리포트

pub mod commands;
