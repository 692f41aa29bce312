//! HTTP/웹소켓 핸들러.

pub mod notifications;
pub mod ws;
