//! 알림 문서 모델
//!
//! Wazuh가 active-response 스크립트에 넘기는 JSON 문서를 감쌉니다.
//! 스키마 검증은 하지 않으며, 추출기가 필요로 하는 필드만 읽기 전용으로 조회합니다.
//!
//! 추출에 쓰이는 경로:
//! - `rule.id`: 룰 ID (없으면 `"N/A"`)
//! - `srcip`, `dstip`: 출발지/목적지 IP (최상위 필드)
//! - `agent.ip`: 알림을 보고한 에이전트 IP

use serde_json::{Map, Value};

use crate::error::AlertError;

/// 룰 ID가 없을 때 사용하는 표시값
pub const RULE_ID_UNAVAILABLE: &str = "N/A";

/// 파싱된 알림 문서
///
/// 최상위는 항상 JSON 객체입니다. 입력을 읽지 못한 경우 빈 객체가 됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    document: Map<String, Value>,
}

impl Alert {
    /// 빈 알림을 생성합니다.
    pub fn empty() -> Self {
        Self::default()
    }

    /// JSON 값으로부터 알림을 생성합니다.
    ///
    /// # Errors
    ///
    /// 최상위 값이 객체가 아니면 `AlertError::NotAnObject`를 반환합니다.
    pub fn from_value(value: Value) -> Result<Self, AlertError> {
        match value {
            Value::Object(document) => Ok(Self { document }),
            other => Err(AlertError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// 문서에 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// 점(`.`)으로 구분된 경로의 값을 조회합니다.
    ///
    /// 중간 값이 객체가 아니면 `None`입니다.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.document.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// 문자열 필드를 조회합니다.
    ///
    /// 빈 문자열과 문자열이 아닌 값은 없는 것으로 취급합니다.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// 룰 ID를 문자열로 반환합니다.
    ///
    /// 숫자 ID는 JSON 표기 그대로 문자열화합니다 (`100001` → `"100001"`).
    /// 없거나 `null`이면 [`RULE_ID_UNAVAILABLE`]을 반환합니다.
    pub fn rule_id(&self) -> String {
        match self.get("rule.id") {
            None | Some(Value::Null) => RULE_ID_UNAVAILABLE.to_owned(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// `srcip`를 반환합니다.
    pub fn src_ip(&self) -> Option<&str> {
        self.get_str("srcip")
    }

    /// `dstip`를 반환합니다.
    pub fn dst_ip(&self) -> Option<&str> {
        self.get_str("dstip")
    }

    /// `agent.ip`를 반환합니다.
    pub fn agent_ip(&self) -> Option<&str> {
        self.get_str("agent.ip")
    }

    /// 내부 JSON 객체를 반환합니다.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.document
    }

    /// JSON 값으로 변환합니다.
    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }
}

impl TryFrom<Value> for Alert {
    type Error = AlertError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
