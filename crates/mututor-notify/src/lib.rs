//! # mututor-notify
//!
//! 실시간 알림 허브.
//! 사용자별 라이브 전송 채널 레지스트리와 best-effort 팬아웃을 제공한다.
//!
//! 전송 보장은 채널 단위 제출 순서뿐이다 — 채널 간 순서, ACK, 재전송은
//! 제공하지 않는다. 끊긴 채널은 전송 실패 시점에 즉시 제거된다.

pub mod hub;
pub mod message;

pub use hub::{ConnectionId, NotificationHub};
pub use message::{NotificationPayload, PushMessage};
