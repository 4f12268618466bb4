//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 알림 추출기와 플로우 집행기가 공유하는 데이터 구조를 정의합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnforcementError;

/// 기본 OpenFlow 스위치 노드 ID
///
/// 현재 토폴로지에서 알려진 유일한 스위치입니다.
pub const DEFAULT_NODE_ID: &str = "openflow:1";

/// 트래픽 방향
///
/// 차단 매치를 패킷의 출발지 IPv4 주소에 걸지, 목적지 주소에 걸지를 나타냅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 출발지 IP 매칭 (`ipv4-source`)
    Src,
    /// 목적지 IP 매칭 (`ipv4-destination`)
    Dst,
}

impl Direction {
    /// 플로우 ID와 URL에 쓰이는 고정 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Src => "src",
            Self::Dst => "dst",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EnforcementError;

    /// 정확히 `src` 또는 `dst`만 허용합니다 (대소문자 구분).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "src" => Ok(Self::Src),
            "dst" => Ok(Self::Dst),
            other => Err(EnforcementError::InvalidFlowType(other.to_owned())),
        }
    }
}

/// 집행 대상
///
/// 추출기의 출력입니다. `ip`가 없으면 `direction`도 없으며,
/// 이 경우 플로우 집행기를 호출하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementTarget {
    /// 차단할 IP 주소
    pub ip: Option<String>,
    /// 트래픽 방향
    pub direction: Option<Direction>,
    /// 대상 스위치 노드 ID
    pub node_id: String,
}

impl EnforcementTarget {
    /// IP와 방향이 정해진 대상을 생성합니다.
    pub fn new(ip: impl Into<String>, direction: Direction) -> Self {
        Self {
            ip: Some(ip.into()),
            direction: Some(direction),
            node_id: DEFAULT_NODE_ID.to_owned(),
        }
    }

    /// "조치 없음" 대상을 생성합니다.
    pub fn none() -> Self {
        Self {
            ip: None,
            direction: None,
            node_id: DEFAULT_NODE_ID.to_owned(),
        }
    }

    /// 선택적 IP로부터 대상을 생성합니다.
    ///
    /// IP가 없으면 방향도 버려서 불변식을 유지합니다.
    pub fn from_optional(ip: Option<String>, direction: Direction) -> Self {
        match ip {
            Some(ip) => Self::new(ip, direction),
            None => Self::none(),
        }
    }

    /// 노드 ID를 지정합니다.
    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = node_id.into();
        self
    }

    /// 집행할 IP와 방향을 함께 반환합니다.
    pub fn actionable(&self) -> Option<(&str, Direction)> {
        match (&self.ip, self.direction) {
            (Some(ip), Some(direction)) => Some((ip.as_str(), direction)),
            _ => None,
        }
    }

    /// 조치가 필요 없는 대상인지 확인합니다.
    pub fn is_no_action(&self) -> bool {
        self.actionable().is_none()
    }
}

impl fmt::Display for EnforcementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actionable() {
            Some((ip, direction)) => write!(f, "{ip} ({direction}) on {}", self.node_id),
            None => write!(f, "no action on {}", self.node_id),
        }
    }
}
