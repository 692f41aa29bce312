//! 스키마 마이그레이션.
//!
//! 버전 기반 SQLite 스키마 관리.

use rusqlite::Connection;
use tracing::{debug, info};

/// 현재 스키마 버전
const CURRENT_VERSION: u32 = 2;

/// 스키마 마이그레이션 실행
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let current = get_version(conn)?;
    info!("현재 스키마 버전: {current}, 목표: {CURRENT_VERSION}");

    if current < 1 {
        migrate_v1(conn)?;
    }

    if current < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

/// 현재 스키마 버전 조회
fn get_version(conn: &Connection) -> Result<u32, rusqlite::Error> {
    let result: Result<u32, _> = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    );
    result.or(Ok(0))
}

/// V1: 일정 테이블 (courses, course_sessions, enrollments)
fn migrate_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    debug!("마이그레이션 V1 실행: 일정 테이블");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY,
            tutor_id TEXT NOT NULL,
            title TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_courses_tutor ON courses(tutor_id);

        CREATE TABLE IF NOT EXISTS course_sessions (
            id INTEGER PRIMARY KEY,
            course_id INTEGER NOT NULL,
            number INTEGER NOT NULL,
            session_date TEXT NOT NULL,   -- YYYY-MM-DD
            start_time TEXT NOT NULL,     -- HH:MM:SS
            end_time TEXT NOT NULL,       -- HH:MM:SS
            format TEXT NOT NULL,         -- online | offline
            location TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_course ON course_sessions(course_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_start
            ON course_sessions(session_date, start_time);

        CREATE TABLE IF NOT EXISTS enrollments (
            id INTEGER PRIMARY KEY,
            tutee_id TEXT NOT NULL,
            course_id INTEGER NOT NULL,
            status TEXT NOT NULL          -- enrolled | completed | dropped
        );
        CREATE INDEX IF NOT EXISTS idx_enrollments_tutee ON enrollments(tutee_id);
        CREATE INDEX IF NOT EXISTS idx_enrollments_course ON enrollments(course_id);

        INSERT INTO schema_version (version) VALUES (1);
        ",
    )
}

/// V2: 알림 테이블
///
/// (user_id, related_id, type) 유니크 제약은 의도적으로 걸지 않는다 —
/// 리마인더 중복 방지는 애플리케이션 레벨 존재 검사이고, 드문 중복은
/// 수용된 동작이다.
fn migrate_v2(conn: &Connection) -> Result<(), rusqlite::Error> {
    debug!("마이그레이션 V2 실행: 알림 테이블");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS notifications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            type TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            related_id INTEGER,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id);
        CREATE INDEX IF NOT EXISTS idx_notifications_dedup
            ON notifications(user_id, related_id, type);

        INSERT INTO schema_version (version) VALUES (2);
        ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn tables_exist_after_migration() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
                 AND name IN ('courses','course_sessions','enrollments','notifications')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }
}
