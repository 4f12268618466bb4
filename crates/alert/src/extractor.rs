//! 집행 대상 추출기
//!
//! 알림의 룰 ID를 분류하고, 분류에 따라 차단할 IP와 방향을 고릅니다.
//!
//! - `100001` 외부 공격자: `srcip`, `src`
//! - `100002` C2 통신: `dstip`, `dst`
//! - `100003` 감염 호스트: `agent.ip`, `src`
//! - 그 외: `agent.ip`, 없으면 `srcip`, `src`
//!
//! IP를 찾지 못하면 방향 없이 "조치 없음" 대상을 반환합니다. 에러가 아닙니다.
//! 고른 값이 IPv4 주소가 아니면 WARNING 진단을 남기고 역시 "조치 없음"입니다.

use std::net::Ipv4Addr;

use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::types::{DEFAULT_NODE_ID, EnforcementTarget};

use crate::alert::Alert;
use crate::rule::RuleClass;

/// 집행 대상 추출기
#[derive(Debug, Clone)]
pub struct TargetExtractor {
    node_id: String,
}

impl TargetExtractor {
    /// 기본 노드 ID(`openflow:1`)를 쓰는 추출기를 생성합니다.
    pub fn new() -> Self {
        Self {
            node_id: DEFAULT_NODE_ID.to_owned(),
        }
    }

    /// 대상 노드 ID를 지정합니다.
    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = node_id.into();
        self
    }

    /// 대상 노드 ID를 반환합니다.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// 알림에서 집행 대상을 결정합니다.
    ///
    /// 알림은 이 호출에서 소비됩니다.
    pub fn extract(&self, alert: Alert, sink: &dyn DiagnosticSink) -> EnforcementTarget {
        let rule_id = alert.rule_id();
        sink.info(&format!("extracting data for rule id: {rule_id}"));

        let class = RuleClass::classify(&rule_id);
        let ip = match class {
            RuleClass::InboundAttacker => Self::select(class, "srcip", alert.src_ip(), sink),
            RuleClass::C2Destination => Self::select(class, "dstip", alert.dst_ip(), sink),
            RuleClass::CompromisedHost => Self::select(class, "agent.ip", alert.agent_ip(), sink),
            RuleClass::Unmatched => {
                sink.info(&format!(
                    "no specific logic for rule id {rule_id}, falling back to agent/src ip"
                ));
                let chosen = alert
                    .agent_ip()
                    .map(|ip| ("agent.ip", ip))
                    .or_else(|| alert.src_ip().map(|ip| ("srcip", ip)));
                match chosen {
                    Some((field, ip)) => Self::accept(field, ip, sink).inspect(|ip| {
                        sink.info(&format!("fallback selected ip: {ip}"));
                    }),
                    None => {
                        sink.info("fallback found no agent or source ip, no action");
                        None
                    }
                }
            }
        };

        EnforcementTarget::from_optional(ip, class.direction()).with_node_id(self.node_id.clone())
    }

    fn select(
        class: RuleClass,
        field: &str,
        ip: Option<&str>,
        sink: &dyn DiagnosticSink,
    ) -> Option<String> {
        match ip {
            Some(ip) => Self::accept(field, ip, sink).inspect(|ip| {
                sink.info(&format!("identified {class} ip: {ip}"));
            }),
            None => {
                sink.info(&format!("{class} rule matched but '{field}' is absent, no action"));
                None
            }
        }
    }

    // 플로우 ID와 URL 경로에 들어가므로 IPv4 주소만 통과
    fn accept(field: &str, ip: &str, sink: &dyn DiagnosticSink) -> Option<String> {
        match ip.parse::<Ipv4Addr>() {
            Ok(_) => Some(ip.to_owned()),
            Err(_) => {
                sink.warning(&format!(
                    "'{field}' value '{ip}' is not an IPv4 address, no action"
                ));
                None
            }
        }
    }
}

impl Default for TargetExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 기본 추출기로 집행 대상을 결정합니다.
pub fn extract(alert: Alert, sink: &dyn DiagnosticSink) -> EnforcementTarget {
    TargetExtractor::new().extract(alert, sink)
}
