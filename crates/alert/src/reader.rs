//! 알림 리더 -- 입력 스트림에서 알림 문서를 읽습니다.
//!
//! 스트림 끝까지 읽은 뒤 하나의 JSON 문서로 파싱합니다.
//! 실패는 호출자에게 전파하지 않습니다. 진단 싱크에 기록하고 빈 [`Alert`]를 돌려주며,
//! 이후 추출기는 빈 알림을 "조치 없음"으로 처리합니다.
//!
//! | 상황 | 레벨 |
//! |---|---|
//! | 빈 입력 (0바이트) | WARNING |
//! | JSON 문법 오류, 객체가 아닌 최상위 값, 크기 초과 | ERROR |
//! | 읽기 실패, UTF-8이 아닌 입력 | CRITICAL |

use std::io::Read;

use flowguard_core::config::AlertConfig;
use flowguard_core::diagnostic::DiagnosticSink;

use crate::alert::Alert;
use crate::error::AlertError;

/// 기본 최대 입력 크기 (1 MB)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1024 * 1024;

/// 알림 리더
///
/// # 사용 예시
/// ```
/// use flowguard_alert::AlertReader;
/// use flowguard_core::TracingSink;
///
/// let reader = AlertReader::new();
/// let alert = reader.read(&br#"{"rule":{"id":"100001"}}"#[..], &TracingSink);
/// assert_eq!(alert.rule_id(), "100001");
/// ```
#[derive(Debug, Clone)]
pub struct AlertReader {
    /// 최대 입력 크기 (바이트)
    max_input_size: usize,
}

impl AlertReader {
    /// 기본 설정으로 리더를 생성합니다.
    pub fn new() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }

    /// 설정 파일의 `[alert]` 섹션으로 리더를 생성합니다.
    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new().with_max_input_size(config.max_input_bytes)
    }

    /// 최대 입력 크기를 설정합니다.
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// 설정된 최대 입력 크기를 반환합니다.
    pub fn max_input_size(&self) -> usize {
        self.max_input_size
    }

    /// 입력 스트림 전체를 읽어 알림으로 파싱합니다.
    ///
    /// 어떤 입력이든 패닉하지 않으며, 실패 시 빈 알림을 반환합니다.
    pub fn read<R: Read>(&self, input: R, sink: &dyn DiagnosticSink) -> Alert {
        sink.info("attempting to read alert from input stream");

        match self.try_read(input) {
            Ok(alert) => {
                sink.info("alert JSON read successfully");
                sink.debug(&format!("alert has {} top-level fields", alert.as_map().len()));
                alert
            }
            Err(e) => {
                let message = match &e {
                    AlertError::Empty => "input stream was empty, no alert data to process".to_owned(),
                    AlertError::Json { .. } => format!("failed to decode JSON alert: {e}"),
                    AlertError::NotAnObject { .. } | AlertError::TooLarge { .. } => {
                        format!("rejected alert input: {e}")
                    }
                    AlertError::Io(_) | AlertError::InvalidUtf8(_) => {
                        format!("unexpected error while reading alert: {e}")
                    }
                };
                sink.emit(e.diagnostic_level(), &message);
                Alert::empty()
            }
        }
    }

    /// 입력 스트림을 읽고 파싱하며, 실패를 에러로 반환합니다.
    ///
    /// # Errors
    ///
    /// 읽기 실패, 빈 입력, 크기 초과, 파싱 실패 시 `AlertError`를 반환합니다.
    pub fn try_read<R: Read>(&self, input: R) -> Result<Alert, AlertError> {
        let limit = u64::try_from(self.max_input_size)
            .unwrap_or(u64::MAX)
            .saturating_add(1);

        let mut buf = Vec::new();
        input.take(limit).read_to_end(&mut buf)?;

        if buf.len() > self.max_input_size {
            return Err(AlertError::TooLarge {
                max: self.max_input_size,
            });
        }

        self.parse(&buf)
    }

    /// 메모리에 있는 바이트를 알림으로 파싱합니다.
    ///
    /// # Errors
    ///
    /// 빈 입력, 크기 초과, UTF-8 오류, JSON 오류, 객체가 아닌 최상위 값에 대해
    /// `AlertError`를 반환합니다.
    pub fn parse(&self, raw: &[u8]) -> Result<Alert, AlertError> {
        if raw.is_empty() {
            return Err(AlertError::Empty);
        }
        if raw.len() > self.max_input_size {
            return Err(AlertError::TooLarge {
                max: self.max_input_size,
            });
        }

        let text = std::str::from_utf8(raw)?;
        let value: serde_json::Value = serde_json::from_str(text)?;
        Alert::from_value(value)
    }
}

impl Default for AlertReader {
    fn default() -> Self {
        Self::new()
    }
}

/// 기본 설정의 리더로 알림을 읽습니다.
pub fn read_alert<R: Read>(input: R, sink: &dyn DiagnosticSink) -> Alert {
    AlertReader::new().read(input, sink)
}
