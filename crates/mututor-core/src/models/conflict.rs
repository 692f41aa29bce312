//! 충돌 판정 결과.
//!
//! 충돌은 예외가 아니라 데이터다. 탐지기는 발견한 충돌 전부를 모아
//! 반환하고, 호출자가 사용자에게 보여줄 메시지로 가공한다.

use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;
use super::room::Room;

/// 일정 충돌 — 기존 세션 슬롯과 겹침
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// 충돌 상대 강좌 ID
    pub course_id: i64,
    /// 충돌 상대 강좌 제목
    pub course_title: String,
    /// 충돌 상대 세션 슬롯 ID
    pub slot_id: i64,
    /// 충돌 상대 세션의 시간 구간
    pub interval: TimeInterval,
}

impl std::fmt::Display for ScheduleConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' 강좌의 세션({})과 겹침",
            self.course_title, self.interval
        )
    }
}

/// 강의실 충돌 — 요청 구간에 강의실 사용 불가
///
/// 항상 같은 구간에 비어 있는 대체 강의실 목록을 함께 담는다.
/// 호출자는 실패만 전하지 말고 복구 경로를 제시할 수 있어야 한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConflict {
    /// 사용 불가한 강의실 ID
    pub room_id: String,
    /// 요청한 시간 구간
    pub interval: TimeInterval,
    /// 같은 구간에 예약 가능한 대체 강의실들
    pub alternatives: Vec<Room>,
}
