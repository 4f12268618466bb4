#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Map, Value};

use flowguard_alert::{Alert, TargetExtractor};
use flowguard_core::diagnostic::{DiagnosticLevel, DiagnosticSink};

struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _level: DiagnosticLevel, _message: &str) {}
}

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    rule_id: FuzzRuleId,
    srcip: Option<FuzzField>,
    dstip: Option<FuzzField>,
    agent_ip: Option<FuzzField>,
}

/// 규칙 ID는 알려진 세 값이 자주 나오도록 구성
#[derive(Arbitrary, Debug)]
enum FuzzRuleId {
    Inbound,
    C2,
    Compromised,
    Numeric(u32),
    Text(String),
    Null,
    Missing,
}

/// 필드 값은 문자열 외의 JSON 타입도 섞음
#[derive(Arbitrary, Debug)]
enum FuzzField {
    Text(String),
    Number(i64),
    Bool(bool),
    Null,
}

impl FuzzField {
    fn to_value(&self) -> Value {
        match self {
            FuzzField::Text(s) => Value::String(s.clone()),
            FuzzField::Number(n) => json!(n),
            FuzzField::Bool(b) => Value::Bool(*b),
            FuzzField::Null => Value::Null,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let mut doc = Map::new();

    let rule_id = match &input.rule_id {
        FuzzRuleId::Inbound => Some(json!("100001")),
        FuzzRuleId::C2 => Some(json!("100002")),
        FuzzRuleId::Compromised => Some(json!(100003)),
        FuzzRuleId::Numeric(n) => Some(json!(n)),
        FuzzRuleId::Text(s) => Some(json!(s)),
        FuzzRuleId::Null => Some(Value::Null),
        FuzzRuleId::Missing => None,
    };
    if let Some(id) = rule_id {
        doc.insert("rule".to_owned(), json!({ "id": id }));
    }
    if let Some(field) = &input.srcip {
        doc.insert("srcip".to_owned(), field.to_value());
    }
    if let Some(field) = &input.dstip {
        doc.insert("dstip".to_owned(), field.to_value());
    }
    if let Some(field) = &input.agent_ip {
        doc.insert("agent".to_owned(), json!({ "ip": field.to_value() }));
    }

    let Ok(alert) = Alert::from_value(Value::Object(doc)) else {
        return;
    };
    let candidates: Vec<String> = [alert.src_ip(), alert.dst_ip(), alert.agent_ip()]
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .collect();

    let target = TargetExtractor::new().extract(alert, &NullSink);

    // ip가 있으면 방향도 있고, ip는 알림 필드 중 하나에서 온 IPv4 주소여야 함
    assert_eq!(target.ip.is_some(), target.direction.is_some());
    if let Some(ip) = &target.ip {
        assert!(candidates.contains(ip));
        assert!(ip.parse::<std::net::Ipv4Addr>().is_ok());
    }
});
