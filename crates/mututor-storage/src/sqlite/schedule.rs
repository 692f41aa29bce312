//! 일정 스토리지 (CourseRepository + EnrollmentRepository 포트 구현).
//!
//! 강좌/세션/수강 레코드는 상위 CRUD 서비스가 소유하고, 이 코어는
//! 조회 전용 포트로만 접근한다. 시드 헬퍼(insert_*)는 앱 초기화와
//! 테스트 픽스처 구성에 쓰인다.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::params;

use mututor_core::error::CoreError;
use mututor_core::models::course::{Course, SessionFormat, SessionSlot};
use mututor_core::models::enrollment::{Enrollment, EnrollmentStatus};
use mututor_core::models::interval::TimeInterval;
use mututor_core::ports::{CourseRepository, EnrollmentRepository};

use super::SqliteStorage;

/// 저장용 문자열 → 수강 상태
fn status_from_str(s: &str) -> Result<EnrollmentStatus, CoreError> {
    match s {
        "enrolled" => Ok(EnrollmentStatus::Enrolled),
        "completed" => Ok(EnrollmentStatus::Completed),
        "dropped" => Ok(EnrollmentStatus::Dropped),
        other => Err(CoreError::Storage(format!("알 수 없는 수강 상태: {other}"))),
    }
}

/// 수강 상태 → 저장용 문자열
fn status_to_str(status: EnrollmentStatus) -> &'static str {
    match status {
        EnrollmentStatus::Enrolled => "enrolled",
        EnrollmentStatus::Completed => "completed",
        EnrollmentStatus::Dropped => "dropped",
    }
}

/// 저장용 문자열 → 세션 형식
fn format_from_str(s: &str) -> Result<SessionFormat, CoreError> {
    match s {
        "online" => Ok(SessionFormat::Online),
        "offline" => Ok(SessionFormat::Offline),
        other => Err(CoreError::Storage(format!("알 수 없는 세션 형식: {other}"))),
    }
}

/// 세션 행의 원시 컬럼 값
type RawSlot = (i64, i64, u32, String, String, String, String, Option<String>);

/// 원시 행 → 세션 슬롯
fn slot_from_raw(raw: RawSlot) -> Result<SessionSlot, CoreError> {
    let (id, course_id, number, date, start, end, format, location) = raw;
    let parse = |what: &str, e: chrono::ParseError| {
        CoreError::Storage(format!("세션 {id}의 {what} 파싱 실패: {e}"))
    };
    let interval = TimeInterval::new(
        date.parse().map_err(|e| parse("날짜", e))?,
        start.parse().map_err(|e| parse("시작 시각", e))?,
        end.parse().map_err(|e| parse("종료 시각", e))?,
    )?;
    Ok(SessionSlot {
        id,
        course_id,
        number,
        interval,
        format: format_from_str(&format)?,
        location,
    })
}

const SLOT_COLUMNS: &str =
    "id, course_id, number, session_date, start_time, end_time, format, location";

impl SqliteStorage {
    /// 강좌 삽입 (시드/테스트용)
    pub async fn insert_course(
        &self,
        id: i64,
        tutor_id: &str,
        title: &str,
    ) -> Result<(), CoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO courses (id, tutor_id, title) VALUES (?1, ?2, ?3)",
            params![id, tutor_id, title],
        )
        .map_err(|e| CoreError::Storage(format!("강좌 삽입 실패: {e}")))?;
        Ok(())
    }

    /// 세션 슬롯 삽입 (시드/테스트용)
    pub async fn insert_slot(
        &self,
        id: i64,
        course_id: i64,
        number: u32,
        interval: TimeInterval,
        format: SessionFormat,
        location: Option<&str>,
    ) -> Result<(), CoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO course_sessions
                 (id, course_id, number, session_date, start_time, end_time, format, location)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                course_id,
                number,
                interval.date.to_string(),
                interval.start.format("%H:%M:%S").to_string(),
                interval.end.format("%H:%M:%S").to_string(),
                format.as_str(),
                location,
            ],
        )
        .map_err(|e| CoreError::Storage(format!("세션 삽입 실패: {e}")))?;
        Ok(())
    }

    /// 수강 신청 삽입 (시드/테스트용)
    pub async fn insert_enrollment(
        &self,
        id: i64,
        tutee_id: &str,
        course_id: i64,
        status: EnrollmentStatus,
    ) -> Result<(), CoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO enrollments (id, tutee_id, course_id, status) VALUES (?1, ?2, ?3, ?4)",
            params![id, tutee_id, course_id, status_to_str(status)],
        )
        .map_err(|e| CoreError::Storage(format!("수강 신청 삽입 실패: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for SqliteStorage {
    async fn find_course(&self, course_id: i64) -> Result<Option<Course>, CoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, tutor_id, title FROM courses WHERE id = ?1")
            .map_err(|e| CoreError::Storage(format!("강좌 조회 준비 실패: {e}")))?;
        let mut rows = stmt
            .query_map(params![course_id], |row| {
                Ok(Course {
                    id: row.get(0)?,
                    tutor_id: row.get(1)?,
                    title: row.get(2)?,
                })
            })
            .map_err(|e| CoreError::Storage(format!("강좌 조회 실패: {e}")))?;
        rows.next()
            .transpose()
            .map_err(|e| CoreError::Storage(format!("강좌 행 읽기 실패: {e}")))
    }

    async fn find_slot(&self, slot_id: i64) -> Result<Option<SessionSlot>, CoreError> {
        let raw: Option<RawSlot> = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SLOT_COLUMNS} FROM course_sessions WHERE id = ?1"
                ))
                .map_err(|e| CoreError::Storage(format!("세션 조회 준비 실패: {e}")))?;
            let mut rows = stmt
                .query_map(params![slot_id], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                })
                .map_err(|e| CoreError::Storage(format!("세션 조회 실패: {e}")))?;
            rows.next()
                .transpose()
                .map_err(|e| CoreError::Storage(format!("세션 행 읽기 실패: {e}")))?
        };
        raw.map(slot_from_raw).transpose()
    }

    async fn courses_by_tutor(&self, tutor_id: &str) -> Result<Vec<Course>, CoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, tutor_id, title FROM courses WHERE tutor_id = ?1 ORDER BY id")
            .map_err(|e| CoreError::Storage(format!("강좌 목록 준비 실패: {e}")))?;
        let rows = stmt
            .query_map(params![tutor_id], |row| {
                Ok(Course {
                    id: row.get(0)?,
                    tutor_id: row.get(1)?,
                    title: row.get(2)?,
                })
            })
            .map_err(|e| CoreError::Storage(format!("강좌 목록 조회 실패: {e}")))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::Storage(format!("강좌 행 읽기 실패: {e}")))
    }

    async fn slots_by_course(&self, course_id: i64) -> Result<Vec<SessionSlot>, CoreError> {
        let raws: Vec<RawSlot> = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SLOT_COLUMNS} FROM course_sessions
                     WHERE course_id = ?1 ORDER BY session_date, start_time"
                ))
                .map_err(|e| CoreError::Storage(format!("세션 목록 준비 실패: {e}")))?;
            let rows = stmt
                .query_map(params![course_id], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                })
                .map_err(|e| CoreError::Storage(format!("세션 목록 조회 실패: {e}")))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| CoreError::Storage(format!("세션 행 읽기 실패: {e}")))?
        };
        raws.into_iter().map(slot_from_raw).collect()
    }

    async fn slots_starting_within(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<SessionSlot>, CoreError> {
        // ISO 형식 문자열은 사전순 == 시간순
        let from_str = from.format("%Y-%m-%d %H:%M:%S").to_string();
        let to_str = to.format("%Y-%m-%d %H:%M:%S").to_string();

        let raws: Vec<RawSlot> = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SLOT_COLUMNS} FROM course_sessions
                     WHERE (session_date || ' ' || start_time) > ?1
                       AND (session_date || ' ' || start_time) <= ?2
                     ORDER BY session_date, start_time"
                ))
                .map_err(|e| CoreError::Storage(format!("스캔 쿼리 준비 실패: {e}")))?;
            let rows = stmt
                .query_map(params![from_str, to_str], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                })
                .map_err(|e| CoreError::Storage(format!("스캔 쿼리 실패: {e}")))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| CoreError::Storage(format!("스캔 행 읽기 실패: {e}")))?
        };
        raws.into_iter().map(slot_from_raw).collect()
    }
}

#[async_trait]
impl EnrollmentRepository for SqliteStorage {
    async fn enrollments_by_tutee(
        &self,
        tutee_id: &str,
        status: EnrollmentStatus,
    ) -> Result<Vec<Enrollment>, CoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, tutee_id, course_id, status FROM enrollments
                 WHERE tutee_id = ?1 AND status = ?2 ORDER BY id",
            )
            .map_err(|e| CoreError::Storage(format!("수강 목록 준비 실패: {e}")))?;
        let rows = stmt
            .query_map(params![tutee_id, status_to_str(status)], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| CoreError::Storage(format!("수강 목록 조회 실패: {e}")))?;
        let raws = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::Storage(format!("수강 행 읽기 실패: {e}")))?;
        raws.into_iter()
            .map(|(id, tutee_id, course_id, status)| {
                Ok(Enrollment {
                    id,
                    tutee_id,
                    course_id,
                    status: status_from_str(&status)?,
                })
            })
            .collect()
    }

    async fn enrolled_tutees(&self, course_id: i64) -> Result<Vec<String>, CoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT tutee_id FROM enrollments
                 WHERE course_id = ?1 AND status = 'enrolled' ORDER BY id",
            )
            .map_err(|e| CoreError::Storage(format!("튜티 목록 준비 실패: {e}")))?;
        let rows = stmt
            .query_map(params![course_id], |row| row.get::<_, String>(0))
            .map_err(|e| CoreError::Storage(format!("튜티 목록 조회 실패: {e}")))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::Storage(format!("튜티 행 읽기 실패: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(date: &str, start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(
            date.parse().unwrap(),
            format!("{start}:00").parse().unwrap(),
            format!("{end}:00").parse().unwrap(),
        )
        .unwrap()
    }

    async fn seeded() -> SqliteStorage {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.insert_course(1, "tutor_a", "Calculus I").await.unwrap();
        storage.insert_course(2, "tutor_a", "Physics").await.unwrap();
        storage.insert_course(3, "tutor_b", "History").await.unwrap();
        storage
            .insert_slot(
                10,
                1,
                1,
                interval("2025-11-13", "14:00", "16:00"),
                SessionFormat::Offline,
                Some("H1-101"),
            )
            .await
            .unwrap();
        storage
            .insert_slot(
                11,
                1,
                2,
                interval("2025-11-20", "14:00", "16:00"),
                SessionFormat::Online,
                None,
            )
            .await
            .unwrap();
        storage
            .insert_enrollment(100, "tutee_1", 1, EnrollmentStatus::Enrolled)
            .await
            .unwrap();
        storage
            .insert_enrollment(101, "tutee_2", 1, EnrollmentStatus::Dropped)
            .await
            .unwrap();
        storage
    }

    #[tokio::test]
    async fn find_course_and_missing_course() {
        let storage = seeded().await;
        let course = storage.find_course(1).await.unwrap().unwrap();
        assert_eq!(course.title, "Calculus I");
        assert_eq!(course.tutor_id, "tutor_a");
        assert!(storage.find_course(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn courses_by_tutor_filters_owner() {
        let storage = seeded().await;
        let courses = storage.courses_by_tutor("tutor_a").await.unwrap();
        assert_eq!(courses.len(), 2);
        assert!(storage.courses_by_tutor("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slot_roundtrip_preserves_interval() {
        let storage = seeded().await;
        let slot = storage.find_slot(10).await.unwrap().unwrap();
        assert_eq!(slot.course_id, 1);
        assert_eq!(slot.interval, interval("2025-11-13", "14:00", "16:00"));
        assert_eq!(slot.format, SessionFormat::Offline);
        assert_eq!(slot.location.as_deref(), Some("H1-101"));
    }

    #[tokio::test]
    async fn slots_starting_within_is_half_open_from_exclusive() {
        let storage = seeded().await;

        // from == 슬롯 시작 시각이면 제외, to == 시작 시각이면 포함
        let hits = storage
            .slots_starting_within(
                "2025-11-13T14:00:00".parse().unwrap(),
                "2025-11-20T14:00:00".parse().unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 11);
    }

    #[tokio::test]
    async fn enrolled_tutees_skips_dropped() {
        let storage = seeded().await;
        let tutees = storage.enrolled_tutees(1).await.unwrap();
        assert_eq!(tutees, vec!["tutee_1".to_string()]);
    }

    #[tokio::test]
    async fn enrollments_by_tutee_filters_status() {
        let storage = seeded().await;
        let enrolled = storage
            .enrollments_by_tutee("tutee_2", EnrollmentStatus::Enrolled)
            .await
            .unwrap();
        assert!(enrolled.is_empty());
        let dropped = storage
            .enrollments_by_tutee("tutee_2", EnrollmentStatus::Dropped)
            .await
            .unwrap();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].course_id, 1);
    }
}
