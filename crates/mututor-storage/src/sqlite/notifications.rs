//! 알림 스토리지 (NotificationStore 포트 구현).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::params;

use mututor_core::error::CoreError;
use mututor_core::models::notification::{NewNotification, Notification, NotificationType};
use mututor_core::ports::NotificationStore;

use super::SqliteStorage;

/// 알림 종류 → 저장용 문자열
fn type_to_str(t: NotificationType) -> &'static str {
    match t {
        NotificationType::SessionReminder => "session_reminder",
        NotificationType::ScheduleChange => "schedule_change",
        NotificationType::EnrollmentSuccess => "enrollment_success",
        NotificationType::EnrollmentCancelled => "enrollment_cancelled",
        NotificationType::FeedbackRequest => "feedback_request",
        NotificationType::SystemAnnouncement => "system_announcement",
    }
}

/// 저장용 문자열 → 알림 종류
fn type_from_str(s: &str) -> Result<NotificationType, CoreError> {
    match s {
        "session_reminder" => Ok(NotificationType::SessionReminder),
        "schedule_change" => Ok(NotificationType::ScheduleChange),
        "enrollment_success" => Ok(NotificationType::EnrollmentSuccess),
        "enrollment_cancelled" => Ok(NotificationType::EnrollmentCancelled),
        "feedback_request" => Ok(NotificationType::FeedbackRequest),
        "system_announcement" => Ok(NotificationType::SystemAnnouncement),
        other => Err(CoreError::Storage(format!("알 수 없는 알림 종류: {other}"))),
    }
}

/// 알림 행의 원시 컬럼 값
type RawNotification = (i64, String, String, String, String, Option<i64>, bool, String);

/// 원시 행 → 알림 레코드
fn notification_from_raw(raw: RawNotification) -> Result<Notification, CoreError> {
    let (id, user_id, type_str, title, content, related_id, is_read, created_at) = raw;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| CoreError::Storage(format!("알림 {id}의 생성 시각 파싱 실패: {e}")))?
        .with_timezone(&Utc);
    Ok(Notification {
        id,
        user_id,
        notification_type: type_from_str(&type_str)?,
        title,
        content,
        related_id,
        is_read,
        created_at,
    })
}

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, type, title, content, related_id, is_read, created_at";

impl SqliteStorage {
    /// 단건 조회 (동기 내부 구현)
    fn query_notification(
        &self,
        where_clause: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Option<Notification>, CoreError> {
        let raw: Option<RawNotification> = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE {where_clause}"
                ))
                .map_err(|e| CoreError::Storage(format!("알림 조회 준비 실패: {e}")))?;
            let mut rows = stmt
                .query_map(params, |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                })
                .map_err(|e| CoreError::Storage(format!("알림 조회 실패: {e}")))?;
            rows.next()
                .transpose()
                .map_err(|e| CoreError::Storage(format!("알림 행 읽기 실패: {e}")))?
        };
        raw.map(notification_from_raw).transpose()
    }
}

#[async_trait]
impl NotificationStore for SqliteStorage {
    async fn create(&self, new: NewNotification) -> Result<Notification, CoreError> {
        let created_at = Utc::now();
        let id = {
            let conn = self.lock()?;
            conn.execute(
                "INSERT INTO notifications (user_id, type, title, content, related_id, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
                params![
                    new.user_id,
                    type_to_str(new.notification_type),
                    new.title,
                    new.content,
                    new.related_id,
                    created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| CoreError::Storage(format!("알림 생성 실패: {e}")))?;
            conn.last_insert_rowid()
        };

        Ok(Notification {
            id,
            user_id: new.user_id,
            notification_type: new.notification_type,
            title: new.title,
            content: new.content,
            related_id: new.related_id,
            is_read: false,
            created_at,
        })
    }

    async fn find_by_user_and_related(
        &self,
        user_id: &str,
        related_id: i64,
        notification_type: NotificationType,
    ) -> Result<Option<Notification>, CoreError> {
        self.query_notification(
            "user_id = ?1 AND related_id = ?2 AND type = ?3",
            &[&user_id, &related_id, &type_to_str(notification_type)],
        )
    }

    async fn find_by_id(&self, notification_id: i64) -> Result<Option<Notification>, CoreError> {
        self.query_notification("id = ?1", &[&notification_id])
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, CoreError> {
        let raws: Vec<RawNotification> = {
            let conn = self.lock()?;
            let filter = if unread_only { "AND is_read = 0" } else { "" };
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {NOTIFICATION_COLUMNS} FROM notifications
                     WHERE user_id = ?1 {filter}
                     ORDER BY created_at DESC, id DESC"
                ))
                .map_err(|e| CoreError::Storage(format!("알림 목록 준비 실패: {e}")))?;
            let rows = stmt
                .query_map(params![user_id], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                })
                .map_err(|e| CoreError::Storage(format!("알림 목록 조회 실패: {e}")))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| CoreError::Storage(format!("알림 행 읽기 실패: {e}")))?
        };
        raws.into_iter().map(notification_from_raw).collect()
    }

    async fn mark_as_read(
        &self,
        notification_id: i64,
    ) -> Result<Option<Notification>, CoreError> {
        let changed = {
            let conn = self.lock()?;
            conn.execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ?1",
                params![notification_id],
            )
            .map_err(|e| CoreError::Storage(format!("읽음 처리 실패: {e}")))?
        };
        if changed == 0 {
            return Ok(None);
        }
        self.query_notification("id = ?1", &[&notification_id])
    }

    async fn mark_all_as_read(&self, user_id: &str) -> Result<usize, CoreError> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE notifications SET is_read = 1 WHERE user_id = ?1 AND is_read = 0",
            params![user_id],
        )
        .map_err(|e| CoreError::Storage(format!("전체 읽음 처리 실패: {e}")))
    }
}
