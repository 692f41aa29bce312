//! 강의실 캘린더 포트.
//!
//! 오프라인 세션의 강의실 가용성/예약은 외부 시간표 백엔드가 담당한다.
//! 이 코어는 소비자일 뿐이며, 테스트/개발용 인메모리 구현이
//! `mututor-storage::memory`에 있다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::interval::TimeInterval;
use crate::models::room::Room;

/// 외부 강의실 캘린더 인터페이스
#[async_trait]
pub trait RoomCalendar: Send + Sync {
    /// 해당 구간에 강의실이 비어 있는지 확인.
    ///
    /// `exclude_slot`은 세션 수정 시 자기 자신의 기존 예약을 제외할 때 쓴다.
    /// 알 수 없는 강의실 ID는 NotFound 에러다 — "충돌 없음"으로 취급하지 않는다.
    async fn is_available(
        &self,
        room_id: &str,
        interval: &TimeInterval,
        exclude_slot: Option<i64>,
    ) -> Result<bool, CoreError>;

    /// 해당 구간에 비어 있는 강의실 목록 (대체 강의실 제안용)
    async fn free_rooms_at(
        &self,
        interval: &TimeInterval,
        exclude_room: Option<&str>,
    ) -> Result<Vec<Room>, CoreError>;

    /// 강의실 예약. 성공 여부 반환.
    async fn book(
        &self,
        room_id: &str,
        owner_id: &str,
        interval: &TimeInterval,
        note: &str,
    ) -> Result<bool, CoreError>;

    /// 예약 취소. 성공 여부 반환.
    async fn cancel_booking(&self, booking_id: i64, owner_id: &str) -> Result<bool, CoreError>;
}
