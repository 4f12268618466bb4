//! 에러 타입 -- 도메인별 에러 정의

/// Flowguard 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum FlowguardError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 알림 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 플로우 룰 적용/제거 에러
    #[error("enforcement error: {0}")]
    Enforcement(#[from] EnforcementError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 입력이 비어있음
    #[error("empty input")]
    Empty,

    /// 파싱 실패
    #[error("parse failed at line {line} column {column}: {reason}")]
    Failed {
        line: usize,
        column: usize,
        reason: String,
    },

    /// 최상위 값이 JSON 객체가 아님
    #[error("expected JSON object at top level, found {found}")]
    NotAnObject { found: String },

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },
}

/// 플로우 룰 적용/제거 에러
#[derive(Debug, thiserror::Error)]
pub enum EnforcementError {
    /// 방향 값이 `src`/`dst`가 아님
    #[error("invalid flow type '{0}' (expected 'src' or 'dst')")]
    InvalidFlowType(String),

    /// 대상이 IPv4 주소가 아님
    #[error("invalid target ip '{0}' (expected an IPv4 address)")]
    InvalidIp(String),

    /// 컨트롤러 요청 실패 (연결, 타임아웃 등)
    #[error("controller request failed: {0}")]
    Transport(String),

    /// 컨트롤러가 2xx가 아닌 응답을 반환
    #[error("controller returned HTTP {status}")]
    Status { status: u16, body: Option<String> },
}
