//! 강의실 모델.
//!
//! 강의실 목록/예약은 외부 백엔드([`crate::ports::room_calendar`]) 소관이고,
//! 여기서는 조회 결과로 주고받는 데이터 형태만 정의한다.

use serde::{Deserialize, Serialize};

/// 물리 강의실
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// 강의실 ID (외부 백엔드 기준)
    pub id: String,
    /// 강의실 이름 (예: "H1-101")
    pub name: String,
    /// 수용 인원
    pub capacity: Option<u32>,
}
