//! 푸시 채널 와이어 메시지.
//!
//! 클라이언트는 `{"type": "...", "data": {...}}` 형태의 JSON 텍스트
//! 프레임을 수신한다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mututor_core::models::notification::Notification;

/// 서버 → 클라이언트 푸시 메시지
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PushMessage {
    /// 새 알림 도착
    #[serde(rename = "NEW_NOTIFICATION")]
    NewNotification(NotificationPayload),
    /// 연결 확인 (keepalive)
    #[serde(rename = "PING")]
    Ping,
}

/// 알림 푸시 페이로드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// 알림 ID
    pub id: i64,
    /// 제목
    pub title: String,
    /// 본문
    pub content: String,
    /// 알림 종류 (snake_case 문자열)
    #[serde(rename = "type")]
    pub notification_type: String,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

impl PushMessage {
    /// 저장된 알림 레코드로부터 푸시 메시지 생성
    pub fn from_notification(notification: &Notification) -> Self {
        let type_str = serde_json::to_value(notification.notification_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| "system_announcement".to_string());

        PushMessage::NewNotification(NotificationPayload {
            id: notification.id,
            title: notification.title.clone(),
            content: notification.content.clone(),
            notification_type: type_str,
            created_at: notification.created_at,
        })
    }
}
