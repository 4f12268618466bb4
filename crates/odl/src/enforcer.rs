//! 플로우 집행기 -- 컨트롤러에 차단 룰을 설치/제거합니다.
//!
//! [`OdlFlowEnforcer`]는 core의 [`FlowEnforcer`] trait을 구현합니다.
//! 모든 실패(잘못된 방향이나 IP, 전송 실패, 2xx가 아닌 응답)는 ERROR 진단 메시지와
//! `false`로 접히며, 호출자에게 에러가 전파되지 않습니다. 재시도는 하지 않습니다.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tracing::debug;

use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::pipeline::FlowEnforcer;
use flowguard_core::types::Direction;

use crate::config::OdlClientConfig;
use crate::error::OdlError;
use crate::flow::FlowRule;
use crate::transport::{HttpTransport, ReqwestTransport};

/// 요청 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowOperation {
    Apply,
    Remove,
}

impl FlowOperation {
    fn verb(&self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Remove => "remove",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Self::Apply => "applied",
            Self::Remove => "removed",
        }
    }
}

/// OpenDaylight RESTCONF 플로우 집행기
pub struct OdlFlowEnforcer<T: HttpTransport = ReqwestTransport> {
    /// 플로우 엔드포인트 기본 URL (끝의 `/` 제거됨)
    base_url: String,
    /// HTTP 전송
    transport: T,
    /// 진단 싱크
    sink: Arc<dyn DiagnosticSink>,
}

impl OdlFlowEnforcer<ReqwestTransport> {
    /// 설정을 검증하고 `reqwest` 기반 집행기를 생성합니다.
    ///
    /// # Errors
    ///
    /// 필수 설정이 없으면 `OdlError::Config`,
    /// HTTP 클라이언트를 만들 수 없으면 `OdlError::ClientBuild`를 반환합니다.
    pub fn new(config: &OdlClientConfig, sink: Arc<dyn DiagnosticSink>) -> Result<Self, OdlError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config.normalized_base_url(), transport, sink))
    }
}

impl<T: HttpTransport> OdlFlowEnforcer<T> {
    /// 임의의 전송 구현으로 집행기를 생성합니다.
    pub fn with_transport(
        base_url: impl Into<String>,
        transport: T,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            transport,
            sink,
        }
    }

    /// 기본 URL을 반환합니다.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 전송 구현에 대한 참조를 반환합니다.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn execute(&self, op: FlowOperation, ip: &str, flow_type: &str, node_id: &str) -> bool {
        let direction = match flow_type.parse::<Direction>() {
            Ok(direction) => direction,
            Err(_) => {
                let err = OdlError::InvalidFlowType(flow_type.to_owned());
                self.sink.error(&format!("[ODL] {err} for ip {ip}"));
                return false;
            }
        };

        // IP는 URL 경로 세그먼트가 되므로 요청 전에 검증
        if ip.parse::<Ipv4Addr>().is_err() {
            let err = OdlError::InvalidIp(ip.to_owned());
            self.sink
                .error(&format!("[ODL] failed to {} flow rule: {err}", op.verb()));
            return false;
        }

        let rule = FlowRule::block(ip, direction);
        match self.send(op, &rule, node_id) {
            Ok(()) => {
                self.sink.info(&format!(
                    "[ODL] successfully {} flow rule: {} for ip {ip} ({direction}) on {node_id}",
                    op.past_tense(),
                    rule.id()
                ));
                true
            }
            Err(e) => {
                self.sink.error(&format!(
                    "[ODL] failed to {} flow rule: {} for ip {ip} ({direction}). error: {e}. response: {}",
                    op.verb(),
                    rule.id(),
                    e.response_body().unwrap_or("none")
                ));
                false
            }
        }
    }

    fn send(&self, op: FlowOperation, rule: &FlowRule, node_id: &str) -> Result<(), OdlError> {
        let url = rule.resource_url(&self.base_url, node_id);
        debug!(url = url.as_str(), operation = op.verb(), "sending flow request");

        let response = match op {
            FlowOperation::Apply => {
                let body = serde_json::to_string(&rule.payload())?;
                self.transport.put_json(&url, body)?
            }
            FlowOperation::Remove => self.transport.delete(&url)?,
        };

        if response.is_success() {
            Ok(())
        } else {
            Err(OdlError::Status {
                status: response.status,
                body: response.body,
            })
        }
    }
}

impl<T: HttpTransport> FlowEnforcer for OdlFlowEnforcer<T> {
    fn apply_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool {
        self.execute(FlowOperation::Apply, ip, flow_type, node_id)
    }

    fn remove_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool {
        self.execute(FlowOperation::Remove, ip, flow_type, node_id)
    }
}
