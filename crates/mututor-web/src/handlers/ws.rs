//! 웹소켓 푸시 채널 핸들러.
//!
//! GET /ws/notifications/{user_id}
//!
//! 연결되면 허브에 채널을 등록하고, 닫히거나 전송이 실패할 때까지
//! 서버 → 클라이언트 메시지를 중계한다. 클라이언트가 보내는 프레임은
//! 전송 계층 keepalive뿐이므로 내용을 해석하지 않고 소비한다.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use mututor_notify::NotificationHub;

use crate::AppState;

/// 웹소켓 업그레이드 엔드포인트
pub async fn notifications_ws(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub.clone(), user_id))
}

/// 업그레이드된 소켓 하나의 수명 관리
async fn handle_socket(socket: WebSocket, hub: Arc<NotificationHub>, user_id: String) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let connection_id = hub.connect(&user_id, tx);
    info!("웹소켓 연결: user={}, conn={}", user_id, connection_id);

    // 허브 → 소켓 중계
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // 소켓 수신 — close까지 keepalive 프레임 소비
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    // 어느 쪽이 먼저 끝나든 반대쪽을 정리
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.disconnect(&user_id, connection_id);
    debug!("웹소켓 해제: user={}, conn={}", user_id, connection_id);
}
