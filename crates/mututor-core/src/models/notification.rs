//! 알림 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// 세션 시작 리마인더 (스케줄러가 생성)
    SessionReminder,
    /// 일정 변경 안내
    ScheduleChange,
    /// 수강 신청 완료
    EnrollmentSuccess,
    /// 수강 취소
    EnrollmentCancelled,
    /// 피드백 요청
    FeedbackRequest,
    /// 시스템 공지
    SystemAnnouncement,
}

/// 저장된 알림 레코드
///
/// id/created_at은 저장소가 부여한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// 알림 ID
    pub id: i64,
    /// 수신 사용자 ID
    pub user_id: String,
    /// 알림 종류
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// 제목
    pub title: String,
    /// 본문
    pub content: String,
    /// 연관 리소스 ID (세션 리마인더면 세션 슬롯 ID)
    pub related_id: Option<i64>,
    /// 읽음 여부
    pub is_read: bool,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

/// 알림 생성 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// 수신 사용자 ID
    pub user_id: String,
    /// 알림 종류
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// 제목
    pub title: String,
    /// 본문
    pub content: String,
    /// 연관 리소스 ID
    pub related_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_renamed_on_wire() {
        let new = NewNotification {
            user_id: "u1".to_string(),
            notification_type: NotificationType::ScheduleChange,
            title: "t".to_string(),
            content: "c".to_string(),
            related_id: None,
        };
        let json = serde_json::to_string(&new).unwrap();
        assert!(json.contains("\"type\":\"schedule_change\""));
    }
}
