//! 통합 테스트 -- 알림 입력부터 집행기 호출까지의 전체 흐름 검증

use std::sync::Mutex;

use flowguard_alert::{AlertReader, Responder, ResponseOutcome, TargetExtractor, extract, read_alert};
use flowguard_core::diagnostic::{DiagnosticLevel, MemorySink};
use flowguard_core::{DEFAULT_NODE_ID, Direction, EnforcementTarget, FlowEnforcer};

/// 호출을 기록하는 집행기
#[derive(Default)]
struct RecordingEnforcer {
    applied: Mutex<Vec<(String, String, String)>>,
}

impl RecordingEnforcer {
    fn applied(&self) -> Vec<(String, String, String)> {
        self.applied.lock().unwrap().clone()
    }
}

impl FlowEnforcer for RecordingEnforcer {
    fn apply_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool {
        self.applied
            .lock()
            .unwrap()
            .push((ip.to_owned(), flow_type.to_owned(), node_id.to_owned()));
        true
    }

    fn remove_flow(&self, _ip: &str, _flow_type: &str, _node_id: &str) -> bool {
        false
    }
}

/// 외부 공격자 알림 (숫자 룰 ID)
#[test]
fn scenario_inbound_attacker_numeric_rule_id() {
    // Given
    let sink = MemorySink::new();
    let enforcer = RecordingEnforcer::default();
    let input = br#"{"rule":{"id":100001},"srcip":"203.0.113.5"}"#;

    // When
    let outcome = Responder::new(&enforcer).respond(&input[..], &sink);

    // Then
    assert_eq!(
        outcome,
        ResponseOutcome::Applied {
            target: EnforcementTarget::new("203.0.113.5", Direction::Src)
        }
    );
    assert_eq!(
        enforcer.applied(),
        vec![("203.0.113.5".to_owned(), "src".to_owned(), DEFAULT_NODE_ID.to_owned())]
    );
}

/// 알 수 없는 룰은 에이전트 IP로 폴백
#[test]
fn scenario_unknown_rule_falls_back_to_agent() {
    // Given
    let sink = MemorySink::new();
    let input = br#"{"rule":{"id":"999999"},"agent":{"ip":"10.1.1.9"}}"#;

    // When
    let alert = read_alert(&input[..], &sink);
    let target = extract(alert, &sink);

    // Then
    assert_eq!(target.actionable(), Some(("10.1.1.9", Direction::Src)));
    assert!(sink.contains(DiagnosticLevel::Info, "no specific logic for rule id 999999"));
}

/// 빈 객체는 조치 없음, 집행기 미호출
#[test]
fn scenario_empty_object_takes_no_action() {
    // Given
    let sink = MemorySink::new();
    let enforcer = RecordingEnforcer::default();

    // When
    let outcome = Responder::new(&enforcer).respond(&b"{}"[..], &sink);

    // Then
    assert_eq!(
        outcome,
        ResponseOutcome::NoAction {
            target: EnforcementTarget::none()
        }
    );
    assert!(enforcer.applied().is_empty());
    assert!(sink.contains(DiagnosticLevel::Info, "rule id: N/A"));
}

/// 빈 입력은 경고 후 조치 없음
#[test]
fn empty_stdin_warns_and_takes_no_action() {
    let sink = MemorySink::new();
    let enforcer = RecordingEnforcer::default();

    let outcome = Responder::new(&enforcer).respond(&b""[..], &sink);

    assert!(matches!(outcome, ResponseOutcome::NoAction { .. }));
    assert!(enforcer.applied().is_empty());
    assert_eq!(sink.messages_at(DiagnosticLevel::Warning).len(), 1);
}

/// 잘못된 JSON은 ERROR 진단과 함께 조치 없음
#[test]
fn malformed_json_is_distinguishable_from_empty() {
    let sink = MemorySink::new();
    let enforcer = RecordingEnforcer::default();

    let outcome = Responder::new(&enforcer).respond(&b"{\"rule\":"[..], &sink);

    assert!(matches!(outcome, ResponseOutcome::NoAction { .. }));
    assert!(sink.messages_at(DiagnosticLevel::Warning).is_empty());
    assert_eq!(sink.messages_at(DiagnosticLevel::Error).len(), 1);
}

/// 설정 기반 리더/추출기 조합
#[test]
fn configured_reader_and_extractor() {
    // Given
    let sink = MemorySink::new();
    let enforcer = RecordingEnforcer::default();
    let responder = Responder::new(&enforcer)
        .with_reader(AlertReader::new().with_max_input_size(64))
        .with_extractor(TargetExtractor::new().with_node_id("openflow:2"));

    // When
    let small = responder.respond(&br#"{"rule":{"id":"100002"},"dstip":"198.51.100.7"}"#[..], &sink);
    let large_input = format!(r#"{{"rule":{{"id":"100001"}},"srcip":"1.2.3.4","pad":"{}"}}"#, "x".repeat(128));
    let large = responder.respond(large_input.as_bytes(), &sink);

    // Then
    assert_eq!(small.target().actionable(), Some(("198.51.100.7", Direction::Dst)));
    assert_eq!(small.target().node_id, "openflow:2");
    assert!(matches!(large, ResponseOutcome::NoAction { .. }));
    assert_eq!(enforcer.applied().len(), 1);
}
