//! 설정 관리.
//!
//! TOML 파일과 `FUND__` 접두사 환경 변수에서 애플리케이션 설정을 읽습니다.
//! 모든 섹션은 기본값을 가지므로 설정 파일 없이도 동작합니다.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{FundError, FundResult};
use crate::types::{default_fund_pool, default_selection, FundProfile};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 분석 파라미터
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 시뮬레이션 펀드 풀
    #[serde(default = "default_fund_pool")]
    pub funds: Vec<FundProfile>,
    /// 포트폴리오 구성
    #[serde(default)]
    pub portfolio: PortfolioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            analysis: AnalysisConfig::default(),
            funds: default_fund_pool(),
            portfolio: PortfolioConfig::default(),
        }
    }
}

/// 로깅 설정.
///
/// `RUST_LOG`, `LOG_FORMAT` 환경 변수가 있으면 이 값보다 우선합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 기록
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

/// 분석 파라미터.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// 연간 무위험 이자율 (소수, 예: 0.025 = 2.5%)
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// 시뮬레이션 기간 수 (일)
    #[serde(default = "default_days")]
    pub days: usize,
    /// 시뮬레이션 난수 시드
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_risk_free_rate() -> f64 {
    0.025
}
fn default_days() -> usize {
    252
}
fn default_seed() -> u64 {
    42
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            days: default_days(),
            seed: default_seed(),
        }
    }
}

/// 포트폴리오 구성 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortfolioConfig {
    /// 선택한 펀드 (순서 유지)
    #[serde(default = "default_selection")]
    pub selected: Vec<String>,
    /// 펀드별 비중 (%). 비어 있으면 균등 배분
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            selected: default_selection(),
            weights: Vec::new(),
        }
    }
}

/// 펀드 하나의 비중 (%).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeightEntry {
    /// 펀드 이름
    pub fund: String,
    /// 비중 (%)
    pub percent: f64,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다. 파일이 없으면 에러입니다.
    pub fn load<P: AsRef<Path>>(path: P) -> FundResult<Self> {
        Self::build(Some(path.as_ref()), true)
    }

    /// 파일이 존재하면 읽고, 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> FundResult<Self> {
        Self::build(Some(path.as_ref()), false)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> FundResult<Self> {
        Self::load_optional("config/default.toml")
    }

    fn build(path: Option<&Path>, required: bool) -> FundResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(required));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("FUND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// 설정 값의 일관성을 검증합니다.
    pub fn validate(&self) -> FundResult<()> {
        if self.analysis.days < 2 {
            return Err(FundError::Config(format!(
                "analysis.days 는 2 이상이어야 합니다 ({})",
                self.analysis.days
            )));
        }
        if !self.analysis.risk_free_rate.is_finite() || self.analysis.risk_free_rate < 0.0 {
            return Err(FundError::Config(format!(
                "analysis.risk_free_rate 가 잘못되었습니다 ({})",
                self.analysis.risk_free_rate
            )));
        }

        let mut names = HashSet::new();
        for fund in &self.funds {
            fund.validate().map_err(|e| FundError::Config(e.to_string()))?;
            if !names.insert(fund.name.as_str()) {
                return Err(FundError::Config(format!("중복된 펀드: {}", fund.name)));
            }
        }

        if let Some(unknown) = self
            .portfolio
            .selected
            .iter()
            .find(|s| !names.contains(s.as_str()))
        {
            return Err(FundError::Config(format!(
                "선택한 펀드가 풀에 없습니다: {}",
                unknown
            )));
        }

        if let Some(unknown) = self
            .portfolio
            .weights
            .iter()
            .find(|w| !self.portfolio.selected.contains(&w.fund))
        {
            return Err(FundError::Config(format!(
                "비중이 지정된 펀드가 선택되지 않았습니다: {}",
                unknown.fund
            )));
        }

        Ok(())
    }

    /// 이름으로 펀드 프로파일을 찾습니다.
    pub fn fund(&self, name: &str) -> Option<&FundProfile> {
        self.funds.iter().find(|f| f.name == name)
    }
}
