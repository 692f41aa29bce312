//! 강좌/세션 저장소 포트.
//!
//! 구현: `mututor-storage` crate (rusqlite)

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::models::course::{Course, SessionSlot};

/// 강좌 및 세션 슬롯 조회 인터페이스
///
/// 충돌 탐지기와 리마인더 스케줄러가 후보 열거에 사용한다.
/// 조회 전용 — 강좌 CRUD는 이 코어의 범위 밖이다.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// 강좌 단건 조회
    async fn find_course(&self, course_id: i64) -> Result<Option<Course>, CoreError>;

    /// 세션 슬롯 단건 조회
    async fn find_slot(&self, slot_id: i64) -> Result<Option<SessionSlot>, CoreError>;

    /// 튜터가 소유한 모든 강좌
    async fn courses_by_tutor(&self, tutor_id: &str) -> Result<Vec<Course>, CoreError>;

    /// 강좌의 모든 세션 슬롯
    async fn slots_by_course(&self, course_id: i64) -> Result<Vec<SessionSlot>, CoreError>;

    /// 시작 시각이 `(from, to]` 구간에 드는 세션 슬롯 (리마인더 스캔용)
    async fn slots_starting_within(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<SessionSlot>, CoreError>;
}
