//! 플로우 룰 -- 차단 룰의 식별자와 RESTCONF 페이로드
//!
//! 플로우 ID는 `(방향, IP)`의 순수 함수이므로 같은 대상에 대한 적용은
//! 같은 리소스에 대한 PUT이 되고, 제거는 같은 URL에 대한 DELETE가 됩니다.
//!
//! 페이로드 형식 (`opendaylight-inventory` flow):
//! ```json
//! {"flow": [{
//!   "id": "block-src-ip-10-0-0-1", "table_id": 0,
//!   "flow-name": "Block src IP 10.0.0.1", "priority": 65535,
//!   "match": {"ethernet-match": {"ethernet-type": {"type": 2048}},
//!             "ipv4-source": "10.0.0.1/32"},
//!   "instructions": {"instruction": [{"order": 0,
//!     "apply-actions": {"action": [{"order": 0, "drop-action": {}}]}}]}
//! }]}
//! ```

use serde::{Deserialize, Serialize};

use flowguard_core::types::Direction;

/// 차단 룰을 설치하는 테이블
pub const FLOW_TABLE_ID: u8 = 0;
/// 차단 룰 우선순위 (최고)
pub const BLOCK_PRIORITY: u16 = 65535;
/// IPv4 EtherType
pub const ETHER_TYPE_IPV4: u16 = 0x0800;

/// 방향과 IP로부터 플로우 ID를 만듭니다.
///
/// IP의 `.`은 `-`로 치환됩니다 (`block-src-ip-10-0-0-1`).
pub fn flow_id(direction: Direction, ip: &str) -> String {
    format!("block-{direction}-ip-{}", ip.replace('.', "-"))
}

/// IP 차단 플로우 룰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRule {
    id: String,
    ip: String,
    direction: Direction,
}

impl FlowRule {
    /// 지정한 IP/방향을 차단하는 룰을 생성합니다.
    pub fn block(ip: impl Into<String>, direction: Direction) -> Self {
        let ip = ip.into();
        Self {
            id: flow_id(direction, &ip),
            ip,
            direction,
        }
    }

    /// 플로우 ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 차단 대상 IP
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// 매치 방향
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 사람이 읽는 플로우 이름 (`Block src IP 10.0.0.1`)
    pub fn flow_name(&self) -> String {
        format!("Block {} IP {}", self.direction, self.ip)
    }

    /// 이 룰의 리소스 URL을 만듭니다.
    ///
    /// `{base_url}/node/{node_id}/table/0/flow/{flow_id}`
    pub fn resource_url(&self, base_url: &str, node_id: &str) -> String {
        format!(
            "{}/node/{node_id}/table/{FLOW_TABLE_ID}/flow/{}",
            base_url.trim_end_matches('/'),
            self.id
        )
    }

    /// RESTCONF 요청 본문을 만듭니다.
    pub fn payload(&self) -> FlowPayload {
        let host = format!("{}/32", self.ip);
        let (ipv4_source, ipv4_destination) = match self.direction {
            Direction::Src => (Some(host), None),
            Direction::Dst => (None, Some(host)),
        };

        FlowPayload {
            flow: vec![FlowEntry {
                id: self.id.clone(),
                table_id: FLOW_TABLE_ID,
                flow_name: self.flow_name(),
                priority: BLOCK_PRIORITY,
                flow_match: FlowMatch {
                    ethernet_match: EthernetMatch {
                        ethernet_type: EthernetType {
                            ether_type: ETHER_TYPE_IPV4,
                        },
                    },
                    ipv4_source,
                    ipv4_destination,
                },
                instructions: Instructions {
                    instruction: vec![Instruction {
                        order: 0,
                        apply_actions: ApplyActions {
                            action: vec![Action {
                                order: 0,
                                drop_action: DropAction {},
                            }],
                        },
                    }],
                },
            }],
        }
    }
}

/// 플로우 요청 본문 최상위
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPayload {
    pub flow: Vec<FlowEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEntry {
    pub id: String,
    pub table_id: u8,
    #[serde(rename = "flow-name")]
    pub flow_name: String,
    pub priority: u16,
    #[serde(rename = "match")]
    pub flow_match: FlowMatch,
    pub instructions: Instructions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlowMatch {
    pub ethernet_match: EthernetMatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_destination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EthernetMatch {
    pub ethernet_type: EthernetType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthernetType {
    #[serde(rename = "type")]
    pub ether_type: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructions {
    pub instruction: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub order: u32,
    #[serde(rename = "apply-actions")]
    pub apply_actions: ApplyActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyActions {
    pub action: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub order: u32,
    #[serde(rename = "drop-action")]
    pub drop_action: DropAction,
}

/// 빈 객체(`{}`)로 직렬화되는 drop 액션
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropAction {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flow_id_replaces_dots() {
        assert_eq!(flow_id(Direction::Src, "203.0.113.5"), "block-src-ip-203-0-113-5");
        assert_eq!(flow_id(Direction::Dst, "10.0.0.1"), "block-dst-ip-10-0-0-1");
    }

    #[test]
    fn flow_name_and_accessors() {
        let rule = FlowRule::block("10.0.0.1", Direction::Dst);
        assert_eq!(rule.id(), "block-dst-ip-10-0-0-1");
        assert_eq!(rule.ip(), "10.0.0.1");
        assert_eq!(rule.direction(), Direction::Dst);
        assert_eq!(rule.flow_name(), "Block dst IP 10.0.0.1");
    }

    #[test]
    fn resource_url_layout() {
        let rule = FlowRule::block("10.0.0.1", Direction::Src);
        assert_eq!(
            rule.resource_url("https://odl:8443/restconf/config/opendaylight-inventory:nodes/", "openflow:1"),
            "https://odl:8443/restconf/config/opendaylight-inventory:nodes/node/openflow:1/table/0/flow/block-src-ip-10-0-0-1"
        );
    }

    #[test]
    fn source_payload_matches_wire_format() {
        let payload = FlowRule::block("10.0.0.1", Direction::Src).payload();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "flow": [{
                    "id": "block-src-ip-10-0-0-1",
                    "table_id": 0,
                    "flow-name": "Block src IP 10.0.0.1",
                    "priority": 65535,
                    "match": {
                        "ethernet-match": {"ethernet-type": {"type": 2048}},
                        "ipv4-source": "10.0.0.1/32"
                    },
                    "instructions": {
                        "instruction": [{
                            "order": 0,
                            "apply-actions": {
                                "action": [{"order": 0, "drop-action": {}}]
                            }
                        }]
                    }
                }]
            })
        );
    }

    #[test]
    fn destination_payload_uses_ipv4_destination_only() {
        let value = serde_json::to_value(FlowRule::block("5.6.7.8", Direction::Dst).payload()).unwrap();
        let matcher = &value["flow"][0]["match"];
        assert_eq!(matcher["ipv4-destination"], "5.6.7.8/32");
        assert!(matcher.get("ipv4-source").is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn ipv4() -> impl Strategy<Value = String> {
            (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
                .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
        }

        fn direction() -> impl Strategy<Value = Direction> {
            prop_oneof![Just(Direction::Src), Just(Direction::Dst)]
        }

        proptest! {
            #[test]
            fn flow_id_is_deterministic(ip in ipv4(), dir in direction()) {
                prop_assert_eq!(flow_id(dir, &ip), flow_id(dir, &ip));
                let rule = FlowRule::block(ip.clone(), dir);
                prop_assert_eq!(rule.id(), flow_id(dir, &ip));
            }

            #[test]
            fn flow_id_never_contains_dot(ip in ipv4(), dir in direction()) {
                prop_assert!(!flow_id(dir, &ip).contains('.'));
            }

            #[test]
            fn flow_id_is_injective(a in ipv4(), da in direction(), b in ipv4(), db in direction()) {
                if (a.as_str(), da) != (b.as_str(), db) {
                    prop_assert_ne!(flow_id(da, &a), flow_id(db, &b));
                }
            }
        }
    }
}
