//! 설정 관리 -- flowguard.toml 파싱 및 런타임 설정
//!
//! [`FlowguardConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`FLOWGUARD_CONTROLLER_PASSWORD=secret` 형식)
//! 3. 설정 파일 (`flowguard.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), flowguard_core::error::FlowguardError> {
//! use flowguard_core::config::FlowguardConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = FlowguardConfig::load("flowguard.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = FlowguardConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, FlowguardError};
use crate::types::DEFAULT_NODE_ID;

/// 컨트롤러 요청 타임아웃 상한 (초)
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// 알림 입력 크기 상한 (16 MiB)
const MAX_ALERT_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Flowguard 통합 설정
///
/// `flowguard.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowguardConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// SDN 컨트롤러 설정
    #[serde(default)]
    pub controller: ControllerConfig,
    /// 알림 입력 설정
    #[serde(default)]
    pub alert: AlertConfig,
}

impl FlowguardConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlowguardError> {
        let mut config = Self::read_file(path.as_ref())?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FlowguardError> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, FlowguardError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FlowguardError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                FlowguardError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, FlowguardError> {
        toml::from_str(toml_str).map_err(|e| {
            FlowguardError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `FLOWGUARD_{SECTION}_{FIELD}`
    /// 예: `FLOWGUARD_CONTROLLER_BASE_URL=https://odl:8443/...`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "FLOWGUARD_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "FLOWGUARD_GENERAL_LOG_FORMAT");
        override_string(&mut self.general.log_file, "FLOWGUARD_GENERAL_LOG_FILE");

        // Controller
        override_string(
            &mut self.controller.base_url,
            "FLOWGUARD_CONTROLLER_BASE_URL",
        );
        override_string(
            &mut self.controller.username,
            "FLOWGUARD_CONTROLLER_USERNAME",
        );
        override_string(
            &mut self.controller.password,
            "FLOWGUARD_CONTROLLER_PASSWORD",
        );
        override_u64(
            &mut self.controller.timeout_secs,
            "FLOWGUARD_CONTROLLER_TIMEOUT_SECS",
        );
        override_bool(
            &mut self.controller.accept_invalid_certs,
            "FLOWGUARD_CONTROLLER_ACCEPT_INVALID_CERTS",
        );
        override_string(
            &mut self.controller.default_node_id,
            "FLOWGUARD_CONTROLLER_DEFAULT_NODE_ID",
        );

        // Alert
        override_usize(
            &mut self.alert.max_input_bytes,
            "FLOWGUARD_ALERT_MAX_INPUT_BYTES",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 컨트롤러 자격 증명의 존재 여부는 여기서 검사하지 않습니다.
    /// 플로우 집행기를 생성할 때 `flowguard-odl`이 검사합니다.
    pub fn validate(&self) -> Result<(), FlowguardError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        validate_endpoint(&self.controller.base_url, self.controller.timeout_secs)?;

        if self.controller.default_node_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "controller.default_node_id".to_owned(),
                reason: "node id must not be empty".to_owned(),
            }
            .into());
        }

        if self.alert.max_input_bytes == 0 || self.alert.max_input_bytes > MAX_ALERT_INPUT_BYTES {
            return Err(ConfigError::InvalidValue {
                field: "alert.max_input_bytes".to_owned(),
                reason: format!("must be 1-{MAX_ALERT_INPUT_BYTES}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
    /// 로그 파일 경로 (비어있으면 stderr)
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
            log_file: String::new(),
        }
    }
}

/// SDN 컨트롤러 설정
///
/// OpenDaylight RESTCONF 플로우 엔드포인트와 자격 증명입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// 플로우 엔드포인트 기본 URL
    /// (예: `https://odl:8443/restconf/config/opendaylight-inventory:nodes`)
    pub base_url: String,
    /// Basic 인증 사용자명
    pub username: String,
    /// Basic 인증 비밀번호
    pub password: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 자체 서명/유효하지 않은 TLS 인증서 허용 (운영 환경에서는 false)
    pub accept_invalid_certs: bool,
    /// 기본 스위치 노드 ID
    pub default_node_id: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_secs: 10,
            accept_invalid_certs: true,
            default_node_id: DEFAULT_NODE_ID.to_owned(),
        }
    }
}

/// 알림 입력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// 최대 허용 입력 크기 (바이트)
    pub max_input_bytes: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// 컨트롤러 URL 형식과 타임아웃 범위를 검증합니다.
///
/// 빈 URL은 통과합니다. 필수 여부는 호출자가 판단합니다.
pub fn validate_endpoint(base_url: &str, timeout_secs: u64) -> Result<(), ConfigError> {
    if !base_url.is_empty() && !base_url.starts_with("http://") && !base_url.starts_with("https://")
    {
        return Err(ConfigError::InvalidValue {
            field: "controller.base_url".to_owned(),
            reason: "must start with http:// or https://".to_owned(),
        });
    }

    if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidValue {
            field: "controller.timeout_secs".to_owned(),
            reason: format!("must be 1-{MAX_TIMEOUT_SECS}"),
        });
    }

    Ok(())
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
