//! 사용자별 전송 채널 레지스트리.
//!
//! 요청 핸들러(웹소켓 연결/해제)와 리마인더 스케줄러(푸시)가 동시에
//! 접근한다. connect/disconnect/send는 레지스트리 락으로 서로 원자적이며,
//! 락을 await 지점 너머로 들고 가지 않는다 — 송신자는 락 안에서 복제해
//! 꺼내고, unbounded 채널 전송은 동기 호출이다.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use mututor_core::error::CoreError;

use crate::message::PushMessage;

/// 연결 식별자
pub type ConnectionId = Uuid;

/// 라이브 전송 채널 하나 — 허브가 수명을 전적으로 소유한다
struct Connection {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<String>,
}

/// 실시간 알림 허브
///
/// userId → 채널 목록. 한 사용자가 탭/기기 여러 개로 동시 접속할 수 있다.
#[derive(Default)]
pub struct NotificationHub {
    connections: RwLock<HashMap<String, Vec<Connection>>>,
}

impl NotificationHub {
    /// 새 허브 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 채널 등록. 핸드셰이크 수락은 호출자(웹 레이어) 소관이다.
    ///
    /// 반환된 ID로 나중에 `disconnect`한다.
    pub fn connect(&self, user_id: &str, tx: mpsc::UnboundedSender<String>) -> ConnectionId {
        let id = Uuid::new_v4();
        let mut connections = self.connections.write();
        let user_connections = connections.entry(user_id.to_string()).or_default();
        user_connections.push(Connection { id, tx });
        debug!(
            "채널 등록: user={}, conn={}, 활성={}",
            user_id,
            id,
            user_connections.len()
        );
        id
    }

    /// 채널 해제. 멱등 — 이미 없으면 no-op.
    pub fn disconnect(&self, user_id: &str, connection_id: ConnectionId) {
        let mut connections = self.connections.write();
        if let Some(user_connections) = connections.get_mut(user_id) {
            user_connections.retain(|c| c.id != connection_id);
            if user_connections.is_empty() {
                connections.remove(user_id);
            }
            debug!("채널 해제: user={}, conn={}", user_id, connection_id);
        }
    }

    /// 사용자의 모든 채널에 메시지 전송 (best-effort 팬아웃).
    ///
    /// 한 채널 실패가 다른 채널 전송을 막지 않으며, 실패한 채널은
    /// 끊긴 것으로 간주해 즉시 제거한다. 등록된 채널이 없으면
    /// 안전한 no-op. 전송 성공한 채널 수를 반환한다.
    pub fn send_personal_message(
        &self,
        payload: &PushMessage,
        user_id: &str,
    ) -> Result<usize, CoreError> {
        let text = serde_json::to_string(payload)?;

        // 송신자를 락 안에서 복제해 꺼낸다
        let targets: Vec<(ConnectionId, mpsc::UnboundedSender<String>)> = {
            let connections = self.connections.read();
            match connections.get(user_id) {
                Some(user_connections) => user_connections
                    .iter()
                    .map(|c| (c.id, c.tx.clone()))
                    .collect(),
                None => return Ok(0),
            }
        };

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, tx) in targets {
            if tx.send(text.clone()).is_ok() {
                delivered += 1;
            } else {
                // 수신 태스크가 사라진 채널 — 암묵적 disconnect
                warn!("채널 전송 실패, 제거: user={}, conn={}", user_id, id);
                dead.push(id);
            }
        }

        for id in dead {
            self.disconnect(user_id, id);
        }

        Ok(delivered)
    }

    /// 사용자의 활성 채널 수
    pub fn connection_count(&self, user_id: &str) -> usize {
        self.connections
            .read()
            .get(user_id)
            .map_or(0, |c| c.len())
    }

    /// 전체 활성 채널 수 (진단용)
    pub fn total_connections(&self) -> usize {
        self.connections.read().values().map(|c| c.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::NotificationPayload;
    use chrono::Utc;

    fn reminder_message() -> PushMessage {
        PushMessage::NewNotification(NotificationPayload {
            id: 1,
            title: "Upcoming Session Reminder".to_string(),
            content: "Your session starts at 14:00.".to_string(),
            notification_type: "session_reminder".to_string(),
            created_at: Utc::now(),
        })
    }

    #[test]
    fn send_to_user_without_channels_is_noop() {
        let hub = NotificationHub::new();
        let delivered = hub
            .send_personal_message(&reminder_message(), "nobody")
            .unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn fan_out_to_all_channels_of_user() {
        let hub = NotificationHub::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (other_tx, mut other_rx) = mpsc::unbounded_channel();

        hub.connect("tutee_1", tx1);
        hub.connect("tutee_1", tx2);
        hub.connect("tutee_2", other_tx);

        let delivered = hub
            .send_personal_message(&reminder_message(), "tutee_1")
            .unwrap();

        assert_eq!(delivered, 2);
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
        assert!(other_rx.try_recv().is_err());
        drop(rx1);
        drop(rx2);
    }

    #[test]
    fn disconnect_unknown_channel_is_noop() {
        let hub = NotificationHub::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        hub.connect("tutee_1", tx);

        hub.disconnect("tutee_1", Uuid::new_v4());
        hub.disconnect("ghost", Uuid::new_v4());

        assert_eq!(hub.connection_count("tutee_1"), 1);
    }

    #[test]
    fn disconnect_removes_only_target_channel() {
        let hub = NotificationHub::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        let id1 = hub.connect("tutee_1", tx1);
        hub.connect("tutee_1", tx2);

        hub.disconnect("tutee_1", id1);
        assert_eq!(hub.connection_count("tutee_1"), 1);

        // 멱등성: 같은 ID로 다시 해제해도 변화 없음
        hub.disconnect("tutee_1", id1);
        assert_eq!(hub.connection_count("tutee_1"), 1);
    }

    #[tokio::test]
    async fn failed_channel_is_pruned_and_others_still_delivered() {
        let hub = NotificationHub::new();
        let (dead_tx, dead_rx) = mpsc::unbounded_channel();
        let (live_tx, mut live_rx) = mpsc::unbounded_channel();

        hub.connect("tutee_1", dead_tx);
        hub.connect("tutee_1", live_tx);
        drop(dead_rx); // 수신 태스크가 죽은 채널

        let delivered = hub
            .send_personal_message(&reminder_message(), "tutee_1")
            .unwrap();

        assert_eq!(delivered, 1);
        assert!(live_rx.try_recv().is_ok());
        // 죽은 채널은 레지스트리에서 제거됨
        assert_eq!(hub.connection_count("tutee_1"), 1);
    }

    #[tokio::test]
    async fn per_channel_order_preserved() {
        let hub = NotificationHub::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.connect("tutee_1", tx);

        for i in 0..3 {
            let msg = PushMessage::NewNotification(NotificationPayload {
                id: i,
                title: format!("n{i}"),
                content: String::new(),
                notification_type: "system_announcement".to_string(),
                created_at: Utc::now(),
            });
            hub.send_personal_message(&msg, "tutee_1").unwrap();
        }

        for i in 0..3 {
            let text = rx.try_recv().unwrap();
            assert!(text.contains(&format!("\"id\":{i}")));
        }
    }

    #[test]
    fn empty_user_entry_removed_on_last_disconnect() {
        let hub = NotificationHub::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = hub.connect("tutee_1", tx);
        hub.disconnect("tutee_1", id);

        assert_eq!(hub.connection_count("tutee_1"), 0);
        assert_eq!(hub.total_connections(), 0);
    }
}
