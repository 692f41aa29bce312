//! 알림 저장소 포트.
//!
//! 구현: `mututor-storage` crate (rusqlite)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::notification::{NewNotification, Notification, NotificationType};

/// 알림 영속화 인터페이스
///
/// 리마인더 스케줄러는 `find_by_user_and_related`로 중복 검사 후
/// `create`를 호출한다. 두 호출 사이는 원자적이지 않다 — 겹치는 스캔이
/// 동시에 돌면 드물게 중복 리마인더가 생길 수 있고, 이는 수용된 트레이드오프다.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// 알림 생성. id와 created_at은 저장소가 부여한다.
    async fn create(&self, new: NewNotification) -> Result<Notification, CoreError>;

    /// (사용자, 연관 ID, 종류)로 기존 알림 조회 — 리마인더 중복 검사용
    async fn find_by_user_and_related(
        &self,
        user_id: &str,
        related_id: i64,
        notification_type: NotificationType,
    ) -> Result<Option<Notification>, CoreError>;

    /// 알림 단건 조회
    async fn find_by_id(&self, notification_id: i64) -> Result<Option<Notification>, CoreError>;

    /// 사용자의 알림 목록 (최신순)
    async fn list_by_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, CoreError>;

    /// 알림 읽음 처리. 없으면 None.
    async fn mark_as_read(&self, notification_id: i64)
        -> Result<Option<Notification>, CoreError>;

    /// 사용자의 안 읽은 알림 전체 읽음 처리. 처리한 건수 반환.
    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize, CoreError>;
}
