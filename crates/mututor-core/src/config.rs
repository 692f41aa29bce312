//! 애플리케이션 설정 구조체.
//!
//! 서버 바인드, 리마인더 스캔 주기, 저장소 경로 등 런타임 설정을 정의한다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 리마인더 스케줄러 설정
    #[serde(default)]
    pub reminder: ReminderConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
}

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 바인드 포트
    #[serde(default = "default_port")]
    pub port: u16,
    /// 외부 접속 허용 여부 (false면 127.0.0.1만 바인드)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allow_external: false,
        }
    }
}

fn default_port() -> u16 {
    8000
}

/// 리마인더 스케줄러 설정
///
/// horizon은 48시간(2일)이 기본값이다. 사용자 문구는 "곧 시작하는" 세션을
/// 암시하지만 실제 스캔 범위는 2일 — 의도적으로 기존 동작을 유지한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// 스캔 간격 (초)
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    /// 리마인더 대상 조회 범위 (시간)
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: u64,
}

impl ReminderConfig {
    /// 스캔 간격을 Duration으로 반환
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// 조회 범위를 chrono Duration으로 반환
    pub fn horizon(&self) -> chrono::Duration {
        chrono::Duration::hours(self.horizon_hours as i64)
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            horizon_hours: default_horizon_hours(),
        }
    }
}

fn default_scan_interval_secs() -> u64 {
    300
}

fn default_horizon_hours() -> u64 {
    48
}

/// 로컬 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite 파일 경로 (None이면 플랫폼 기본 데이터 디렉토리)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}
