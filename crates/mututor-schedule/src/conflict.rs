//! 시간 충돌 탐지기.
//!
//! 세션 생성/수정, 수강 신청 경로에서 요청 핸들러가 동기적으로 호출한다.
//! 세 축 모두 같은 규칙을 쓴다: 같은 날짜 + 반개구간 겹침
//! ([`TimeInterval::overlaps`]).
//!
//! 충돌은 에러가 아니라 반환 데이터다. 첫 충돌에서 멈추지 않고 발견한
//! 전부를 모아 반환해, 사용자가 문제를 한 번에 고칠 수 있게 한다.

use std::sync::Arc;

use tracing::{debug, warn};

use mututor_core::error::CoreError;
use mututor_core::models::conflict::{RoomConflict, ScheduleConflict};
use mututor_core::models::enrollment::EnrollmentStatus;
use mututor_core::models::interval::TimeInterval;
use mututor_core::ports::{CourseRepository, EnrollmentRepository, RoomCalendar};

/// 충돌 탐지기
pub struct ConflictDetector {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    rooms: Arc<dyn RoomCalendar>,
}

impl ConflictDetector {
    /// 새 충돌 탐지기 생성
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        rooms: Arc<dyn RoomCalendar>,
    ) -> Self {
        Self {
            courses,
            enrollments,
            rooms,
        }
    }

    /// 튜터 축 충돌 탐지.
    ///
    /// 튜터가 소유한 모든 강좌의 모든 세션 슬롯과 후보 구간을 비교한다.
    /// `exclude_slot`은 세션 수정 재검증 시 자기 자신을 건너뛰는 용도.
    pub async fn detect_tutor_conflicts(
        &self,
        tutor_id: &str,
        candidate: &TimeInterval,
        exclude_slot: Option<i64>,
    ) -> Result<Vec<ScheduleConflict>, CoreError> {
        let mut conflicts = Vec::new();

        for course in self.courses.courses_by_tutor(tutor_id).await? {
            for slot in self.courses.slots_by_course(course.id).await? {
                if exclude_slot == Some(slot.id) {
                    continue;
                }
                if candidate.overlaps(&slot.interval) {
                    conflicts.push(ScheduleConflict {
                        course_id: course.id,
                        course_title: course.title.clone(),
                        slot_id: slot.id,
                        interval: slot.interval,
                    });
                }
            }
        }

        debug!(
            "튜터 충돌 탐지: tutor={}, 후보={}, 충돌={}건",
            tutor_id,
            candidate,
            conflicts.len()
        );
        Ok(conflicts)
    }

    /// 수강 축 충돌 탐지.
    ///
    /// 후보 강좌의 모든 세션 슬롯을, 튜티가 수강 중(ENROLLED)인 각 강좌의
    /// 모든 세션 슬롯과 쌍별로 비교해 전부 수집한다.
    /// 존재하지 않는 후보 강좌는 NotFound — "충돌 없음"으로 삼키지 않는다.
    pub async fn detect_enrollment_conflicts(
        &self,
        tutee_id: &str,
        candidate_course_id: i64,
    ) -> Result<Vec<ScheduleConflict>, CoreError> {
        if self
            .courses
            .find_course(candidate_course_id)
            .await?
            .is_none()
        {
            return Err(CoreError::not_found("Course", candidate_course_id));
        }

        let candidate_slots = self.courses.slots_by_course(candidate_course_id).await?;
        let enrollments = self
            .enrollments
            .enrollments_by_tutee(tutee_id, EnrollmentStatus::Enrolled)
            .await?;

        let mut conflicts = Vec::new();
        for enrollment in enrollments {
            let enrolled_course = self
                .courses
                .find_course(enrollment.course_id)
                .await?
                .ok_or_else(|| CoreError::not_found("Course", enrollment.course_id))?;
            let existing_slots = self.courses.slots_by_course(enrollment.course_id).await?;

            for candidate_slot in &candidate_slots {
                for existing in &existing_slots {
                    if candidate_slot.interval.overlaps(&existing.interval) {
                        conflicts.push(ScheduleConflict {
                            course_id: enrolled_course.id,
                            course_title: enrolled_course.title.clone(),
                            slot_id: existing.id,
                            interval: existing.interval,
                        });
                    }
                }
            }
        }

        debug!(
            "수강 충돌 탐지: tutee={}, 후보 강좌={}, 충돌={}건",
            tutee_id,
            candidate_course_id,
            conflicts.len()
        );
        Ok(conflicts)
    }

    /// 강의실 축 충돌 탐지.
    ///
    /// 가용성 판정은 외부 캘린더에 위임한다. 사용 불가 판정이 나면 반드시
    /// 같은 구간의 대체 강의실 목록까지 조회해 담는다 — 호출자가 복구
    /// 경로를 제시할 수 있어야 한다. 대체 목록 조회가 실패해도 충돌 보고
    /// 자체는 막지 않는다 (빈 목록으로 degrade).
    pub async fn detect_room_conflict(
        &self,
        room_id: &str,
        interval: &TimeInterval,
        exclude_slot: Option<i64>,
    ) -> Result<Option<RoomConflict>, CoreError> {
        if self
            .rooms
            .is_available(room_id, interval, exclude_slot)
            .await?
        {
            return Ok(None);
        }

        let alternatives = match self.rooms.free_rooms_at(interval, Some(room_id)).await {
            Ok(rooms) => rooms,
            Err(e) => {
                warn!("대체 강의실 조회 실패: room={}, {e}", room_id);
                Vec::new()
            }
        };

        Ok(Some(RoomConflict {
            room_id: room_id.to_string(),
            interval: *interval,
            alternatives,
        }))
    }
}
