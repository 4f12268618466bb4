//! 파이프라인 trait -- 모듈 확장 포인트 정의

/// 플로우 룰을 설치/제거하는 trait
///
/// 응답 오케스트레이션은 이 trait만 알고, 실제 컨트롤러 구현은
/// `flowguard-odl` 크레이트가 제공합니다.
///
/// 두 메서드 모두 에러를 전파하지 않습니다. 실패는 진단 싱크에 기록되고
/// `false`로만 드러납니다.
pub trait FlowEnforcer {
    /// 차단 플로우 룰을 설치합니다.
    ///
    /// `flow_type`은 정확히 `src` 또는 `dst`여야 하며,
    /// 그 외의 값이면 네트워크 호출 없이 `false`를 반환합니다.
    fn apply_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool;

    /// 이전에 설치한 차단 플로우 룰을 제거합니다.
    fn remove_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool;
}

impl<T: FlowEnforcer + ?Sized> FlowEnforcer for &T {
    fn apply_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool {
        (**self).apply_flow(ip, flow_type, node_id)
    }

    fn remove_flow(&self, ip: &str, flow_type: &str, node_id: &str) -> bool {
        (**self).remove_flow(ip, flow_type, node_id)
    }
}
