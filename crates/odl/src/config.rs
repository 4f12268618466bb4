//! 컨트롤러 클라이언트 설정
//!
//! [`OdlClientConfig`]는 core의 [`ControllerConfig`]를 기반으로
//! 플로우 집행기 생성에 필요한 설정을 제공합니다.
//!
//! # 사용 예시
//! ```
//! use flowguard_core::config::FlowguardConfig;
//! use flowguard_odl::config::OdlClientConfig;
//!
//! let core_config = FlowguardConfig::default();
//! let config = OdlClientConfig::from_core(&core_config.controller);
//! // 자격 증명이 비어있으면 집행기를 만들 수 없음
//! assert!(config.validate().is_err());
//! ```

use std::fmt;
use std::time::Duration;

use flowguard_core::config::{ControllerConfig, validate_endpoint};
use flowguard_core::error::ConfigError;

use crate::error::OdlError;

/// 컨트롤러 클라이언트 설정
#[derive(Clone)]
pub struct OdlClientConfig {
    /// 플로우 엔드포인트 기본 URL
    pub base_url: String,
    /// Basic 인증 사용자명
    pub username: String,
    /// Basic 인증 비밀번호
    pub password: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 유효하지 않은 TLS 인증서 허용
    pub accept_invalid_certs: bool,
}

impl Default for OdlClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_secs: 10,
            accept_invalid_certs: true,
        }
    }
}

// 비밀번호는 로그에 남지 않도록 가림
impl fmt::Debug for OdlClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdlClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"********")
            .field("timeout_secs", &self.timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl OdlClientConfig {
    /// core의 `ControllerConfig`에서 클라이언트 설정을 생성합니다.
    pub fn from_core(core: &ControllerConfig) -> Self {
        Self {
            base_url: core.base_url.clone(),
            username: core.username.clone(),
            password: core.password.clone(),
            timeout_secs: core.timeout_secs,
            accept_invalid_certs: core.accept_invalid_certs,
        }
    }

    /// 요청 타임아웃을 `Duration`으로 반환합니다.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 끝의 `/`를 제거한 기본 URL을 반환합니다.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// `base_url`, `username`, `password`는 반드시 있어야 합니다.
    pub fn validate(&self) -> Result<(), OdlError> {
        if self.base_url.is_empty() {
            return Err(OdlError::Config {
                field: "controller.base_url".to_owned(),
                reason: "must be set to build the flow enforcer".to_owned(),
            });
        }

        if self.username.is_empty() {
            return Err(OdlError::Config {
                field: "controller.username".to_owned(),
                reason: "must be set to build the flow enforcer".to_owned(),
            });
        }

        if self.password.is_empty() {
            return Err(OdlError::Config {
                field: "controller.password".to_owned(),
                reason: "must be set to build the flow enforcer".to_owned(),
            });
        }

        validate_endpoint(&self.base_url, self.timeout_secs).map_err(|e| match e {
            ConfigError::InvalidValue { field, reason } => OdlError::Config { field, reason },
            other => OdlError::Config {
                field: "controller".to_owned(),
                reason: other.to_string(),
            },
        })
    }
}

/// 컨트롤러 클라이언트 설정 빌더
#[derive(Default)]
pub struct OdlClientConfigBuilder {
    config: OdlClientConfig,
}

impl OdlClientConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 URL을 설정합니다.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Basic 인증 자격 증명을 설정합니다.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = username.into();
        self.config.password = password.into();
        self
    }

    /// 요청 타임아웃(초)을 설정합니다.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// 유효하지 않은 TLS 인증서 허용 여부를 설정합니다.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// 설정을 검증하고 `OdlClientConfig`를 생성합니다.
    pub fn build(self) -> Result<OdlClientConfig, OdlError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> OdlClientConfig {
        OdlClientConfig {
            base_url: "https://odl:8443/restconf/config/opendaylight-inventory:nodes".to_owned(),
            username: "admin".to_owned(),
            password: "admin".to_owned(),
            ..Default::default()
        }
    }

    fn field_of(err: OdlError) -> String {
        match err {
            OdlError::Config { field, .. } => field,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn default_config_is_missing_credentials() {
        let err = OdlClientConfig::default().validate().unwrap_err();
        assert_eq!(field_of(err), "controller.base_url");
    }

    #[test]
    fn complete_config_is_valid() {
        valid().validate().unwrap();
    }

    #[test]
    fn from_core_preserves_values() {
        let core = ControllerConfig {
            base_url: "http://10.0.0.2:8181/restconf".to_owned(),
            username: "ops".to_owned(),
            password: "secret".to_owned(),
            timeout_secs: 5,
            accept_invalid_certs: false,
            default_node_id: "openflow:3".to_owned(),
        };
        let config = OdlClientConfig::from_core(&core);
        assert_eq!(config.base_url, "http://10.0.0.2:8181/restconf");
        assert_eq!(config.username, "ops");
        assert_eq!(config.password, "secret");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn validate_rejects_missing_username() {
        let config = OdlClientConfig {
            username: String::new(),
            ..valid()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "controller.username");
    }

    #[test]
    fn validate_rejects_missing_password() {
        let config = OdlClientConfig {
            password: String::new(),
            ..valid()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "controller.password");
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = OdlClientConfig {
            base_url: "ftp://odl/restconf".to_owned(),
            ..valid()
        };
        assert_eq!(field_of(config.validate().unwrap_err()), "controller.base_url");
    }

    #[test]
    fn validate_rejects_timeout_out_of_range() {
        for secs in [0, flowguard_core::config::MAX_TIMEOUT_SECS + 1] {
            let config = OdlClientConfig {
                timeout_secs: secs,
                ..valid()
            };
            assert_eq!(field_of(config.validate().unwrap_err()), "controller.timeout_secs");
        }
    }

    #[test]
    fn normalized_base_url_trims_trailing_slash() {
        let config = OdlClientConfig {
            base_url: "http://odl/nodes//".to_owned(),
            ..valid()
        };
        assert_eq!(config.normalized_base_url(), "http://odl/nodes");
    }

    #[test]
    fn debug_masks_password() {
        let config = OdlClientConfig {
            password: "hunter2".to_owned(),
            ..valid()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("********"));
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = OdlClientConfigBuilder::new()
            .base_url("http://127.0.0.1:8181/restconf")
            .credentials("admin", "admin")
            .timeout_secs(3)
            .accept_invalid_certs(false)
            .build()
            .unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = OdlClientConfigBuilder::new()
            .base_url("http://127.0.0.1:8181/restconf")
            .build();
        assert!(result.is_err());
    }
}
