//! 알림 처리 에러 타입
//!
//! [`AlertError`]는 알림 입력을 읽고 파싱하는 동안 발생하는 에러를 표현합니다.
//! 리더는 이 에러를 외부로 전파하지 않고 진단 메시지와 빈 `Alert`로 바꿉니다.
//! `From<AlertError> for FlowguardError` 변환은 파서를 직접 쓰는 호출자를 위한 것입니다.

use flowguard_core::diagnostic::DiagnosticLevel;
use flowguard_core::error::{FlowguardError, ParseError};

/// 알림 입력 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// 입력 스트림이 비어있음
    #[error("input stream was empty")]
    Empty,

    /// 입력 스트림 읽기 실패
    #[error("failed to read input stream: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8이 아닌 입력
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// 입력 크기 초과
    #[error("input too large: more than {max} bytes")]
    TooLarge {
        /// 허용 최대 크기
        max: usize,
    },

    /// JSON 문법 오류
    #[error("invalid JSON at line {line} column {column}: {reason}")]
    Json {
        /// 오류 줄
        line: usize,
        /// 오류 열
        column: usize,
        /// 오류 사유
        reason: String,
    },

    /// 최상위 값이 객체가 아님
    #[error("expected JSON object at top level, found {found}")]
    NotAnObject {
        /// 실제로 발견된 JSON 타입명
        found: &'static str,
    },
}

impl AlertError {
    /// 이 에러를 진단 싱크에 기록할 레벨을 반환합니다.
    ///
    /// 빈 입력은 경고, 형식 오류는 에러, 그 밖의 예기치 못한 실패는 치명적입니다.
    pub fn diagnostic_level(&self) -> DiagnosticLevel {
        match self {
            Self::Empty => DiagnosticLevel::Warning,
            Self::TooLarge { .. } | Self::Json { .. } | Self::NotAnObject { .. } => {
                DiagnosticLevel::Error
            }
            Self::Io(_) | Self::InvalidUtf8(_) => DiagnosticLevel::Critical,
        }
    }
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}

impl From<AlertError> for FlowguardError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Empty => FlowguardError::Parse(ParseError::Empty),
            AlertError::Io(e) => FlowguardError::Io(e),
            AlertError::InvalidUtf8(e) => FlowguardError::Parse(ParseError::Failed {
                line: 0,
                column: e.valid_up_to(),
                reason: e.to_string(),
            }),
            AlertError::TooLarge { max } => FlowguardError::Parse(ParseError::TooLarge {
                size: max.saturating_add(1),
                max,
            }),
            AlertError::Json {
                line,
                column,
                reason,
            } => FlowguardError::Parse(ParseError::Failed {
                line,
                column,
                reason,
            }),
            AlertError::NotAnObject { found } => FlowguardError::Parse(ParseError::NotAnObject {
                found: found.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_warning() {
        assert_eq!(AlertError::Empty.diagnostic_level(), DiagnosticLevel::Warning);
    }

    #[test]
    fn malformed_json_is_error() {
        let err: AlertError = serde_json::from_str::<serde_json::Value>("{bad")
            .unwrap_err()
            .into();
        assert_eq!(err.diagnostic_level(), DiagnosticLevel::Error);
        assert!(matches!(err, AlertError::Json { line: 1, .. }));
    }

    #[test]
    fn io_failure_is_critical() {
        let err = AlertError::Io(std::io::Error::other("broken pipe"));
        assert_eq!(err.diagnostic_level(), DiagnosticLevel::Critical);
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn too_large_display() {
        let err = AlertError::TooLarge { max: 16 };
        assert!(err.to_string().contains("16"));
        assert_eq!(err.diagnostic_level(), DiagnosticLevel::Error);
    }

    #[test]
    fn converts_to_flowguard_parse_error() {
        let err: FlowguardError = AlertError::NotAnObject { found: "array" }.into();
        assert!(matches!(
            err,
            FlowguardError::Parse(ParseError::NotAnObject { ref found }) if found == "array"
        ));
    }

    #[test]
    fn converts_io_to_flowguard_io() {
        let err: FlowguardError = AlertError::Io(std::io::Error::other("x")).into();
        assert!(matches!(err, FlowguardError::Io(_)));
    }

    #[test]
    fn converts_empty_to_parse_empty() {
        let err: FlowguardError = AlertError::Empty.into();
        assert!(matches!(err, FlowguardError::Parse(ParseError::Empty)));
    }
}
