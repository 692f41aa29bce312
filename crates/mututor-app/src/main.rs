//! # mututor-app
//!
//! MUTutor 알림 서버 바이너리 진입점.
//! DI 컨테이너 역할, 라이프사이클 관리.

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mututor_core::config::AppConfig;
use mututor_notify::NotificationHub;
use mututor_schedule::reminder::ReminderScheduler;
use mututor_storage::sqlite::SqliteStorage;
use mututor_web::WebServer;

/// MUTutor 알림 서버
///
/// 세션 리마인더 스케줄러 + 실시간 푸시 허브 + 알림 API
#[derive(Parser, Debug)]
#[command(name = "mututor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 웹 서버 바인드 포트
    #[arg(long, short = 'p', default_value = "8000")]
    port: u16,

    /// 외부 접속 허용 (기본: 127.0.0.1만 바인드)
    #[arg(long)]
    allow_external: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 리마인더 스캔 간격 (초)
    #[arg(long, default_value = "300")]
    scan_interval: u64,

    /// 데이터 저장 경로 (기본: 플랫폼별 데이터 디렉토리)
    #[arg(long)]
    data_dir: Option<String>,
}

/// 데이터베이스 경로 결정 (CLI 인자 또는 플랫폼별 기본 경로)
///
/// # 플랫폼별 기본 경로:
/// - macOS: `~/Library/Application Support/com.mututor.server/mututor.db`
/// - Windows: `%APPDATA%\mututor\server\mututor.db`
/// - Linux: `~/.local/share/mututor/server/mututor.db`
fn resolve_db_path(data_dir: Option<&str>) -> PathBuf {
    data_dir
        .map(|d| PathBuf::from(d).join("mututor.db"))
        .or_else(|| {
            ProjectDirs::from("com", "mututor", "server").map(|p| p.data_dir().join("mututor.db"))
        })
        .unwrap_or_else(|| PathBuf::from("./mututor.db"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = format!(
        "mututor={lvl},mututor_app={lvl},mututor_core={lvl},mututor_schedule={lvl},mututor_notify={lvl},mututor_storage={lvl},mututor_web={lvl}",
        lvl = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("MUTutor 알림 서버 시작");

    // 설정 구성 (CLI 인자로 기본값 오버라이드)
    let mut config = AppConfig::default();
    config.server.port = args.port;
    config.server.allow_external = args.allow_external;
    config.reminder.scan_interval_secs = args.scan_interval;

    // ── 어댑터 생성 (DI 와이어링) ──

    // 1. 저장소 — 일정/알림 포트를 모두 구현
    let db_path = resolve_db_path(args.data_dir.as_deref());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("데이터 디렉토리 생성 실패: {}", parent.display()))?;
    }
    let storage = Arc::new(SqliteStorage::open(&db_path).context("SQLite 저장소 초기화 실패")?);

    // 2. 실시간 알림 허브
    let hub = Arc::new(NotificationHub::new());

    // 3. 리마인더 스케줄러
    let scheduler = ReminderScheduler::new(
        storage.clone(),
        storage.clone(),
        storage.clone(),
        hub.clone(),
        config.reminder.clone(),
    );

    // 4. 웹 서버 (웹소켓 푸시 + 알림 REST)
    let server = WebServer::new(storage.clone(), hub.clone(), config.server.clone());
    info!("알림 API: {}", server.url());

    // ── 종료 신호 배선 ──
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler_handle = tokio::spawn({
        let shutdown_rx = shutdown_rx.clone();
        async move {
            scheduler.run(shutdown_rx).await;
        }
    });

    let server_handle = tokio::spawn(server.run(shutdown_rx));

    // Ctrl+C 대기
    tokio::signal::ctrl_c()
        .await
        .context("Ctrl+C 핸들러 등록 실패")?;
    info!("종료 신호 수신, 정리 중...");
    let _ = shutdown_tx.send(true);

    // 태스크 종료 대기 (최대 5초)
    let shutdown_timeout = std::time::Duration::from_secs(5);
    if tokio::time::timeout(shutdown_timeout, async {
        let _ = scheduler_handle.await;
        match server_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("웹 서버 오류: {e}"),
            Err(e) => error!("웹 서버 태스크 조인 실패: {e}"),
        }
    })
    .await
    .is_err()
    {
        error!("종료 시간 초과, 강제 종료");
    }

    info!("MUTutor 알림 서버 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let path = resolve_db_path(Some("/tmp/mututor-test"));
        assert_eq!(path, PathBuf::from("/tmp/mututor-test/mututor.db"));
    }

    #[test]
    fn default_path_ends_with_db_file() {
        let path = resolve_db_path(None);
        assert!(path.ends_with("mututor.db"));
    }
}
