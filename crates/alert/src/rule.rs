//! 룰 분류 -- 룰 ID를 응답 정책에 대응시킵니다.

use std::fmt;

use flowguard_core::types::Direction;

/// 외부 공격자 룰 ID
pub const RULE_INBOUND_ATTACKER: &str = "100001";
/// C2 통신 룰 ID
pub const RULE_C2_DESTINATION: &str = "100002";
/// 감염 호스트 룰 ID
pub const RULE_COMPROMISED_HOST: &str = "100003";

/// 룰 분류
///
/// 알려진 세 개의 룰 ID는 차단할 IP 필드와 방향이 정해져 있고,
/// 그 밖의 모든 ID는 [`RuleClass::Unmatched`]로 폴백 정책을 따릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleClass {
    /// 외부 공격자 (`srcip`, 출발지 차단)
    InboundAttacker,
    /// C2 서버 통신 (`dstip`, 목적지 차단)
    C2Destination,
    /// 내부 감염 호스트 (`agent.ip`, 출발지 차단)
    CompromisedHost,
    /// 알 수 없는 룰 (에이전트 IP 우선, 출발지 차단)
    Unmatched,
}

impl RuleClass {
    /// 룰 ID 문자열을 분류합니다.
    ///
    /// 정확히 일치하는 문자열만 인식합니다. 앞뒤 공백이나 다른 표기는 `Unmatched`입니다.
    pub fn classify(rule_id: &str) -> Self {
        match rule_id {
            RULE_INBOUND_ATTACKER => Self::InboundAttacker,
            RULE_C2_DESTINATION => Self::C2Destination,
            RULE_COMPROMISED_HOST => Self::CompromisedHost,
            _ => Self::Unmatched,
        }
    }

    /// 이 분류가 차단할 방향을 반환합니다.
    pub fn direction(&self) -> Direction {
        match self {
            Self::C2Destination => Direction::Dst,
            Self::InboundAttacker | Self::CompromisedHost | Self::Unmatched => Direction::Src,
        }
    }

    /// 로그에 쓰는 설명을 반환합니다.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::InboundAttacker => "inbound attacker",
            Self::C2Destination => "C2 destination",
            Self::CompromisedHost => "compromised internal host",
            Self::Unmatched => "unmatched rule",
        }
    }
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
