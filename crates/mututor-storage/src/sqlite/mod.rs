//! SQLite 저장소 어댑터.
//!
//! `NotificationStore` + `CourseRepository` + `EnrollmentRepository` 포트 구현.
//!
//! # 모듈 구조
//! - `notifications`: 알림 생성/조회/읽음 처리 (NotificationStore 포트)
//! - `schedule`: 강좌, 세션 슬롯, 수강 신청 조회와 시드 헬퍼

mod notifications;
mod schedule;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use mututor_core::error::CoreError;

use crate::migration;

/// SQLite 저장소 — 일정/알림 포트 구현
pub struct SqliteStorage {
    pub(super) conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// 파일 기반 SQLite 저장소 생성
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path)
            .map_err(|e| CoreError::Storage(format!("SQLite 열기 실패: {e}")))?;

        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA temp_store=MEMORY;
            ",
        )
        .map_err(|e| CoreError::Storage(format!("PRAGMA 설정 실패: {e}")))?;

        migration::run_migrations(&conn)
            .map_err(|e| CoreError::Storage(format!("마이그레이션 실패: {e}")))?;

        info!("SQLite 저장소 초기화: {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 인메모리 SQLite 저장소 생성 (테스트용)
    pub fn open_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CoreError::Storage(format!("인메모리 SQLite 생성 실패: {e}")))?;

        migration::run_migrations(&conn)
            .map_err(|e| CoreError::Storage(format!("마이그레이션 실패: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 연결 잠금 획득
    pub(super) fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|e| CoreError::Storage(format!("연결 잠금 실패: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_file_backed_storage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mututor.db");
        let storage = SqliteStorage::open(&path).unwrap();
        drop(storage);
        assert!(path.exists());

        // 재오픈 시 마이그레이션 멱등
        SqliteStorage::open(&path).unwrap();
    }
}
