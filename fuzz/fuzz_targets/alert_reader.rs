#![no_main]

use libfuzzer_sys::fuzz_target;
use flowguard_alert::AlertReader;
use flowguard_core::diagnostic::{DiagnosticLevel, DiagnosticSink};

struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _level: DiagnosticLevel, _message: &str) {}
}

fuzz_target!(|data: &[u8]| {
    // 작은 상한으로 크기 초과 경로도 함께 탐색
    let reader = AlertReader::new().with_max_input_size(4096);

    // 어떤 입력이든 패닉 없이 알림(빈 알림 포함)을 돌려줘야 함
    let alert = reader.read(data, &NullSink);
    if reader.try_read(data).is_err() {
        assert!(alert.is_empty());
    }
    let _ = alert.rule_id();
});
