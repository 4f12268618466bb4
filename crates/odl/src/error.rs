//! 컨트롤러 연동 에러 타입
//!
//! [`OdlError`]는 플로우 집행 중 발생하는 에러를 표현합니다.
//! 집행기는 이 에러를 `false`와 진단 메시지로 접지만, 설정 검증 에러는
//! `From<OdlError> for FlowguardError`로 CLI까지 전파되어 설정 에러로 보고됩니다.

use flowguard_core::error::{ConfigError, EnforcementError, FlowguardError};

/// 컨트롤러 연동 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum OdlError {
    /// 방향 값이 `src`/`dst`가 아님
    #[error("invalid flow type '{0}' (expected 'src' or 'dst')")]
    InvalidFlowType(String),

    /// 대상이 IPv4 주소가 아님 (플로우 ID와 URL 경로에 들어갈 수 없음)
    #[error("invalid target ip '{0}' (expected an IPv4 address)")]
    InvalidIp(String),

    /// HTTP 클라이언트 생성 실패
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// 요청 전송 실패 (연결 거부, 타임아웃, TLS 등)
    #[error("request failed: {0}")]
    Transport(String),

    /// 2xx가 아닌 응답
    #[error("controller returned HTTP {status}")]
    Status {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문
        body: String,
    },

    /// 페이로드 직렬화 실패
    #[error("failed to serialize flow payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl OdlError {
    /// 컨트롤러가 돌려준 응답 본문이 있으면 반환합니다.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.is_empty() => Some(body.as_str()),
            _ => None,
        }
    }
}

impl From<OdlError> for FlowguardError {
    fn from(err: OdlError) -> Self {
        match err {
            OdlError::Config { field, reason } => {
                FlowguardError::Config(ConfigError::InvalidValue { field, reason })
            }
            OdlError::InvalidFlowType(value) => {
                FlowguardError::Enforcement(EnforcementError::InvalidFlowType(value))
            }
            OdlError::InvalidIp(value) => {
                FlowguardError::Enforcement(EnforcementError::InvalidIp(value))
            }
            OdlError::Status { status, body } => {
                FlowguardError::Enforcement(EnforcementError::Status {
                    status,
                    body: (!body.is_empty()).then_some(body),
                })
            }
            OdlError::ClientBuild(_) | OdlError::Transport(_) | OdlError::Serialize(_) => {
                FlowguardError::Enforcement(EnforcementError::Transport(err.to_string()))
            }
        }
    }
}
