//! tracing을 사용한 로깅 인프라.
//!
//! 이 모듈은 다양한 출력 형식을 지원하는 구조화된 로깅을 제공합니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 로그 수집용 JSON 형식
//! - **compact**: 간결한 한 줄 형식

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// 로그 레벨 환경 변수
pub const LOG_LEVEL_ENV: &str = "RUST_LOG";

/// 로그 형식 환경 변수
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    #[default]
    Pretty,
    /// JSON 형식
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "fund_analytics=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// span 생성/종료 이벤트 포함 여부
    pub with_span_events: bool,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// span 이벤트 기록 여부를 설정합니다.
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// `RUST_LOG`, `LOG_FORMAT` 환경 변수가 있으면 레벨과 형식을 덮어씁니다.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(LOG_LEVEL_ENV).ok(),
            std::env::var(LOG_FORMAT_ENV).ok(),
        )
    }

    /// 비어 있지 않은 레벨과 해석 가능한 형식만 반영합니다.
    fn with_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }

        match format.as_deref().map(str::parse::<LogFormat>) {
            Some(Ok(format)) => self.format = format,
            Some(Err(e)) => eprintln!("Ignoring {}: {}", LOG_FORMAT_ENV, e),
            None => {}
        }

        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.with_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// CLI 출력과 섞이지 않도록 로그는 stderr로 보냅니다. 레벨 필터는
/// `config.level`만 사용하므로 환경 변수를 반영하려면
/// [`LogConfig::with_env_overrides`]를 먼저 호출합니다.
///
/// # 예제
///
/// ```no_run
/// use fund_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("debug")
///     .with_format(LogFormat::Json)
///     .with_env_overrides();
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(&config.level)?;

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.with_file)
        .with_line_number(config.with_file)
        .with_target(config.with_target)
        .with_span_events(config.span_events());

    let fmt_layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        span_events = config.with_span_events,
        "Logging initialized"
    );

    Ok(())
}

/// 펀드 이름 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! fund_span {
    ($name:expr, $fund:expr) => {
        tracing::info_span!($name, fund = %$fund)
    };
    ($name:expr, $fund:expr, $periods:expr) => {
        tracing::info_span!($name, fund = %$fund, periods = $periods)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .with_span_events(true);

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
        assert_eq!(LogConfig::default().span_events(), FmtSpan::NONE);
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let config = LogConfig::new("info")
            .with_format(LogFormat::Pretty)
            .with_overrides(Some("fund_analytics=debug".into()), Some("json".into()));

        assert_eq!(config.level, "fund_analytics=debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_or_empty_overrides_are_ignored() {
        let config = LogConfig::new("warn")
            .with_format(LogFormat::Compact)
            .with_overrides(Some("  ".into()), Some("xml".into()));
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);

        let config = LogConfig::new("warn").with_overrides(None, None);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
    }
}
