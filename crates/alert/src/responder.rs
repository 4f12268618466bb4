//! Active-response 흐름
//!
//! 한 번의 호출에서 알림을 읽고, 대상을 추출하고, 대상이 있으면
//! [`FlowEnforcer::apply_flow`]를 정확히 한 번 호출합니다. 재시도는 하지 않습니다.

use std::fmt;
use std::io::Read;

use serde::Serialize;

use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::pipeline::FlowEnforcer;
use flowguard_core::types::EnforcementTarget;

use crate::alert::Alert;
use crate::extractor::TargetExtractor;
use crate::reader::AlertReader;

/// 응답 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResponseOutcome {
    /// 차단할 IP가 없어 집행기를 호출하지 않음
    NoAction {
        /// 조치 없음 대상
        target: EnforcementTarget,
    },
    /// 컨트롤러가 플로우 설치를 수락함
    Applied {
        /// 집행 대상
        target: EnforcementTarget,
    },
    /// 플로우 설치 실패
    Failed {
        /// 집행 대상
        target: EnforcementTarget,
    },
}

impl ResponseOutcome {
    /// 결과에 포함된 대상을 반환합니다.
    pub fn target(&self) -> &EnforcementTarget {
        match self {
            Self::NoAction { target } | Self::Applied { target } | Self::Failed { target } => {
                target
            }
        }
    }

    /// 실패 여부를 확인합니다.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for ResponseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAction { .. } => f.write_str("no action"),
            Self::Applied { target } => write!(f, "blocked {target}"),
            Self::Failed { target } => write!(f, "failed to block {target}"),
        }
    }
}

/// Active-response 실행기
///
/// 리더와 추출기 설정을 들고 있고, 집행기는 제네릭으로 주입받습니다.
pub struct Responder<E> {
    reader: AlertReader,
    extractor: TargetExtractor,
    enforcer: E,
}

impl<E: FlowEnforcer> Responder<E> {
    /// 기본 리더와 추출기로 실행기를 생성합니다.
    pub fn new(enforcer: E) -> Self {
        Self {
            reader: AlertReader::new(),
            extractor: TargetExtractor::new(),
            enforcer,
        }
    }

    /// 리더를 교체합니다.
    pub fn with_reader(mut self, reader: AlertReader) -> Self {
        self.reader = reader;
        self
    }

    /// 추출기를 교체합니다.
    pub fn with_extractor(mut self, extractor: TargetExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// 입력 스트림에서 알림을 읽어 응답합니다.
    pub fn respond<R: Read>(&self, input: R, sink: &dyn DiagnosticSink) -> ResponseOutcome {
        let alert = self.reader.read(input, sink);
        self.respond_to(alert, sink)
    }

    /// 이미 읽은 알림에 응답합니다.
    pub fn respond_to(&self, alert: Alert, sink: &dyn DiagnosticSink) -> ResponseOutcome {
        let target = self.extractor.extract(alert, sink);

        let Some((ip, direction)) = target.actionable() else {
            sink.info("no enforcement target, nothing to do");
            return ResponseOutcome::NoAction { target };
        };

        tracing::debug!(ip, direction = %direction, node = %target.node_id, "applying block flow");
        if self
            .enforcer
            .apply_flow(ip, direction.as_str(), &target.node_id)
        {
            sink.info(&format!("response complete: blocked {target}"));
            ResponseOutcome::Applied { target }
        } else {
            sink.error(&format!("response failed: could not block {target}"));
            ResponseOutcome::Failed { target }
        }
    }
}

/// 기본 설정으로 한 번의 active-response를 실행합니다.
pub fn respond<R: Read, E: FlowEnforcer>(
    input: R,
    enforcer: E,
    sink: &dyn DiagnosticSink,
) -> ResponseOutcome {
    Responder::new(enforcer).respond(input, sink)
}
