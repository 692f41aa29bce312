//! 인메모리 강의실 캘린더.
//!
//! 실제 배치에서는 외부 시간표 백엔드가 `RoomCalendar`를 구현한다.
//! 이 구현은 그 백엔드를 대신하는 개발/테스트용 스탠드인으로, 고정된
//! 강의실 목록과 예약 장부를 메모리에 유지한다.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use mututor_core::error::CoreError;
use mututor_core::models::interval::TimeInterval;
use mututor_core::models::room::Room;
use mututor_core::ports::RoomCalendar;

/// 예약 장부 항목
#[derive(Debug, Clone)]
struct Booking {
    id: i64,
    room_id: String,
    owner_id: String,
    interval: TimeInterval,
    /// 이 예약을 만든 세션 슬롯 (세션 수정 시 자기 예약 제외용)
    slot_id: Option<i64>,
}

#[derive(Debug, Default)]
struct Ledger {
    bookings: Vec<Booking>,
    next_id: i64,
}

/// 정적 강의실 목록 + 인메모리 예약 장부
#[derive(Default)]
pub struct StaticRoomCalendar {
    rooms: Vec<Room>,
    ledger: Mutex<Ledger>,
}

impl StaticRoomCalendar {
    /// (id, 이름, 수용 인원) 목록으로 캘린더 생성
    pub fn with_rooms(rooms: &[(&str, &str, u32)]) -> Self {
        Self {
            rooms: rooms
                .iter()
                .map(|(id, name, capacity)| Room {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    capacity: Some(*capacity),
                })
                .collect(),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// 세션 슬롯과 연결된 예약 생성 (슬롯 수정 재검증 시나리오용)
    pub fn book_for_slot(
        &self,
        room_id: &str,
        owner_id: &str,
        interval: &TimeInterval,
        slot_id: i64,
    ) -> Result<i64, CoreError> {
        self.find_room(room_id)?;
        let mut ledger = self.ledger.lock();
        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.bookings.push(Booking {
            id,
            room_id: room_id.to_string(),
            owner_id: owner_id.to_string(),
            interval: *interval,
            slot_id: Some(slot_id),
        });
        Ok(id)
    }

    fn find_room(&self, room_id: &str) -> Result<&Room, CoreError> {
        self.rooms
            .iter()
            .find(|r| r.id == room_id)
            .ok_or_else(|| CoreError::not_found("Room", room_id))
    }

    fn room_free(&self, ledger: &Ledger, room_id: &str, interval: &TimeInterval, exclude_slot: Option<i64>) -> bool {
        !ledger.bookings.iter().any(|b| {
            b.room_id == room_id
                && (exclude_slot.is_none() || b.slot_id != exclude_slot)
                && b.interval.overlaps(interval)
        })
    }
}

#[async_trait]
impl RoomCalendar for StaticRoomCalendar {
    async fn is_available(
        &self,
        room_id: &str,
        interval: &TimeInterval,
        exclude_slot: Option<i64>,
    ) -> Result<bool, CoreError> {
        self.find_room(room_id)?;
        let ledger = self.ledger.lock();
        Ok(self.room_free(&ledger, room_id, interval, exclude_slot))
    }

    async fn free_rooms_at(
        &self,
        interval: &TimeInterval,
        exclude_room: Option<&str>,
    ) -> Result<Vec<Room>, CoreError> {
        let ledger = self.ledger.lock();
        Ok(self
            .rooms
            .iter()
            .filter(|r| exclude_room != Some(r.id.as_str()))
            .filter(|r| self.room_free(&ledger, &r.id, interval, None))
            .cloned()
            .collect())
    }

    async fn book(
        &self,
        room_id: &str,
        owner_id: &str,
        interval: &TimeInterval,
        note: &str,
    ) -> Result<bool, CoreError> {
        self.find_room(room_id)?;
        let mut ledger = self.ledger.lock();
        if !self.room_free(&ledger, room_id, interval, None) {
            return Ok(false);
        }
        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.bookings.push(Booking {
            id,
            room_id: room_id.to_string(),
            owner_id: owner_id.to_string(),
            interval: *interval,
            slot_id: None,
        });
        debug!("강의실 예약: room={}, booking={}, note={}", room_id, id, note);
        Ok(true)
    }

    async fn cancel_booking(&self, booking_id: i64, owner_id: &str) -> Result<bool, CoreError> {
        let mut ledger = self.ledger.lock();
        let before = ledger.bookings.len();
        ledger
            .bookings
            .retain(|b| !(b.id == booking_id && b.owner_id == owner_id));
        Ok(ledger.bookings.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(date: &str, start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(
            date.parse().unwrap(),
            format!("{start}:00").parse().unwrap(),
            format!("{end}:00").parse().unwrap(),
        )
        .unwrap()
    }

    fn calendar() -> StaticRoomCalendar {
        StaticRoomCalendar::with_rooms(&[("R101", "H1-101", 30), ("R102", "H1-102", 20)])
    }

    #[tokio::test]
    async fn booking_blocks_overlapping_interval_only() {
        let calendar = calendar();
        let when = interval("2025-11-13", "14:00", "16:00");
        assert!(calendar.book("R101", "tutor_a", &when, "수업").await.unwrap());

        assert!(!calendar
            .is_available("R101", &interval("2025-11-13", "15:00", "17:00"), None)
            .await
            .unwrap());
        // 끝점이 맞닿으면 사용 가능
        assert!(calendar
            .is_available("R101", &interval("2025-11-13", "16:00", "18:00"), None)
            .await
            .unwrap());
        // 다른 강의실은 영향 없음
        assert!(calendar.is_available("R102", &when, None).await.unwrap());
    }

    #[tokio::test]
    async fn double_booking_rejected() {
        let calendar = calendar();
        let when = interval("2025-11-13", "14:00", "16:00");
        assert!(calendar.book("R101", "tutor_a", &when, "수업").await.unwrap());
        assert!(!calendar.book("R101", "tutor_b", &when, "수업").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let calendar = calendar();
        let when = interval("2025-11-13", "14:00", "16:00");
        assert!(calendar.is_available("R999", &when, None).await.is_err());
        assert!(calendar.book("R999", "tutor_a", &when, "x").await.is_err());
    }

    #[tokio::test]
    async fn free_rooms_excludes_booked_and_excluded() {
        let calendar = calendar();
        let when = interval("2025-11-13", "14:00", "16:00");
        calendar.book("R101", "tutor_a", &when, "수업").await.unwrap();

        let free = calendar.free_rooms_at(&when, None).await.unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, "R102");

        let free = calendar.free_rooms_at(&when, Some("R102")).await.unwrap();
        assert!(free.is_empty());
    }

    #[tokio::test]
    async fn exclude_slot_ignores_own_booking() {
        let calendar = calendar();
        let when = interval("2025-11-13", "14:00", "16:00");
        calendar.book_for_slot("R101", "tutor_a", &when, 10).unwrap();

        // 슬롯 10 수정 재검증: 자기 예약은 충돌로 치지 않는다
        assert!(calendar
            .is_available("R101", &when, Some(10))
            .await
            .unwrap());
        assert!(!calendar.is_available("R101", &when, None).await.unwrap());
    }

    #[tokio::test]
    async fn cancel_booking_requires_owner() {
        let calendar = calendar();
        let when = interval("2025-11-13", "14:00", "16:00");
        calendar.book("R101", "tutor_a", &when, "수업").await.unwrap();

        assert!(!calendar.cancel_booking(1, "intruder").await.unwrap());
        assert!(calendar.cancel_booking(1, "tutor_a").await.unwrap());
        assert!(calendar.is_available("R101", &when, None).await.unwrap());
    }
}
