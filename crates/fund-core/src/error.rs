//! 펀드 분석 시스템의 에러 타입.
//!
//! 지표 계산, 포트폴리오 합성, 데이터 로딩 전반에서 사용되는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 분석 에러.
#[derive(Debug, Error)]
pub enum FundError {
    /// 잘못된 입력 (짧은 시계열, 0 이하 가격, 가중치 합 불일치 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 형식 에러 (CSV 파싱 등)
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 분석 작업을 위한 Result 타입.
pub type FundResult<T> = Result<T, FundError>;

impl FundError {
    /// 잘못된 입력 에러를 생성합니다.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        FundError::InvalidInput(msg.into())
    }

    /// 호출자가 입력을 고쳐야 해결되는 에러인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(self, FundError::InvalidInput(_) | FundError::Data(_))
    }
}

impl From<serde_json::Error> for FundError {
    fn from(err: serde_json::Error) -> Self {
        FundError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for FundError {
    fn from(err: std::io::Error) -> Self {
        FundError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for FundError {
    fn from(err: config::ConfigError) -> Self {
        FundError::Config(err.to_string())
    }
}
