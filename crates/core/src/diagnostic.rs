//! 진단 싱크 -- 컴포넌트가 남기는 진단 메시지의 출력 대상
//!
//! 각 컴포넌트는 전역 로거 대신 [`DiagnosticSink`]을 인자로 받아 메시지를 남깁니다.
//! 프로세스 시작 시 [`TracingSink`]를 한 번 만들어 주입하고,
//! 테스트에서는 `MemorySink`(기능 `test-util`)로 메시지를 수집합니다.
//!
//! # 사용 예시
//! ```
//! use flowguard_core::diagnostic::{DiagnosticLevel, DiagnosticSink, TracingSink};
//!
//! let sink = TracingSink;
//! sink.emit(DiagnosticLevel::Info, "flowguard started");
//! sink.warning("stdin was empty");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// 진단 레벨
///
/// `Ord` 구현으로 레벨 비교가 가능합니다 (`Debug < Info < Warning < Error < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiagnosticLevel {
    /// 디버그
    Debug,
    /// 정보
    #[default]
    Info,
    /// 경고
    Warning,
    /// 에러
    Error,
    /// 치명적
    Critical,
}

impl DiagnosticLevel {
    /// 문자열에서 레벨을 파싱합니다.
    ///
    /// 대소문자를 구분하지 않으며, 알 수 없는 값은 `Info`로 처리합니다.
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "CRITICAL" => Self::Critical,
            _ => Self::Info,
        }
    }

    /// 대문자 레벨명을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 진단 메시지 출력 대상
///
/// `(level, message)` 쌍을 받습니다. 포맷과 영속화는 구현체의 몫입니다.
pub trait DiagnosticSink: Send + Sync {
    /// 진단 메시지를 남깁니다.
    fn emit(&self, level: DiagnosticLevel, message: &str);

    fn debug(&self, message: &str) {
        self.emit(DiagnosticLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(DiagnosticLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.emit(DiagnosticLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(DiagnosticLevel::Error, message);
    }

    fn critical(&self, message: &str) {
        self.emit(DiagnosticLevel::Critical, message);
    }
}

/// `tracing` 매크로로 전달하는 싱크
///
/// `tracing`에는 CRITICAL 레벨이 없으므로 `error!`에 `critical = true` 필드를 붙입니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Debug => tracing::debug!("{message}"),
            DiagnosticLevel::Info => tracing::info!("{message}"),
            DiagnosticLevel::Warning => tracing::warn!("{message}"),
            DiagnosticLevel::Error => tracing::error!("{message}"),
            DiagnosticLevel::Critical => tracing::error!(critical = true, "{message}"),
        }
    }
}

/// 메시지를 메모리에 모으는 테스트용 싱크
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct MemorySink {
    records: std::sync::Mutex<Vec<(DiagnosticLevel, String)>>,
}

#[cfg(any(test, feature = "test-util"))]
impl MemorySink {
    /// 빈 싱크를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 기록된 메시지의 복사본을 반환합니다.
    pub fn records(&self) -> Vec<(DiagnosticLevel, String)> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// 특정 레벨의 메시지만 반환합니다.
    pub fn messages_at(&self, level: DiagnosticLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// 기록된 메시지 중 `needle`을 포함하는 것이 있는지 확인합니다.
    pub fn contains(&self, level: DiagnosticLevel, needle: &str) -> bool {
        self.messages_at(level).iter().any(|m| m.contains(needle))
    }

    /// 기록된 가장 높은 레벨을 반환합니다.
    pub fn max_level(&self) -> Option<DiagnosticLevel> {
        self.records().into_iter().map(|(l, _)| l).max()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl DiagnosticSink for MemorySink {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((level, message.to_owned()));
    }
}
