//! # mututor-web
//!
//! 알림 웹 레이어.
//! Axum 기반 웹소켓 푸시 엔드포인트 + 알림 REST API.
//!
//! ## 기능
//! - 웹소켓 실시간 알림 채널 (`/ws/notifications/{user_id}`)
//! - 알림 목록 조회
//! - 알림 읽음 처리 (단건/전체)

pub mod error;
pub mod handlers;
pub mod routes;

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use mututor_core::config::ServerConfig;
use mututor_core::ports::NotificationStore;
use mututor_notify::NotificationHub;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 알림 저장소
    pub store: Arc<dyn NotificationStore>,
    /// 실시간 알림 허브
    pub hub: Arc<NotificationHub>,
}

/// 알림 웹 서버
pub struct WebServer {
    config: ServerConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(
        store: Arc<dyn NotificationStore>,
        hub: Arc<NotificationHub>,
        config: ServerConfig,
    ) -> Self {
        Self {
            config,
            state: AppState { store, hub },
        }
    }

    /// 서버 실행
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        // CORS 설정
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        // 라우터 구성
        let app = Router::new()
            .route(
                "/ws/notifications/{user_id}",
                get(handlers::ws::notifications_ws),
            )
            .nest("/api", routes::api_routes())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        let addr: SocketAddr = format!("{}:{}", host, self.config.port)
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{e}")))?;

        let listener = TcpListener::bind(addr).await?;
        info!("알림 서버 시작: http://{}", addr);

        // Graceful shutdown과 함께 서버 실행
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("알림 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
