//! 세션 리마인더 스케줄러.
//!
//! 요청과 무관하게 기동 시점부터 종료 신호까지 영원히 도는 백그라운드
//! 태스크. 주기마다 시작 시각이 `(now, now + horizon]`에 드는 세션을
//! 스캔해, 튜티들과 튜터에게 (사용자, 세션) 쌍당 정확히 한 건의
//! SESSION_REMINDER를 만들고 허브로 푸시한다.
//!
//! horizon 기본값은 48시간이다. 알림 문구는 "곧 시작"을 말하지만 실제
//! 범위는 2일 — 기존 동작을 그대로 유지한다.
//!
//! 중복 방지는 존재 검사 후 생성이며 원자적이지 않다. 스캔이 겹치면
//! 드물게 중복 리마인더가 생길 수 있고, 이는 락을 추가하는 대신 수용한
//! 트레이드오프다 (각 단위 작업이 멱등이라 피해가 없다).

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use mututor_core::config::ReminderConfig;
use mututor_core::error::CoreError;
use mututor_core::models::course::{Course, SessionSlot};
use mututor_core::models::notification::{NewNotification, NotificationType};
use mututor_core::ports::{CourseRepository, EnrollmentRepository, NotificationStore};
use mututor_notify::{NotificationHub, PushMessage};

/// 한 번의 스캔 결과 집계
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// 조회된 대상 세션 수
    pub scanned_slots: usize,
    /// 새로 생성된 리마인더 수
    pub created: usize,
    /// 이미 존재해 건너뛴 수
    pub skipped: usize,
    /// 실패해 격리된 단위 작업 수
    pub failed: usize,
}

/// 세션 리마인더 스케줄러
pub struct ReminderScheduler {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    store: Arc<dyn NotificationStore>,
    hub: Arc<NotificationHub>,
    config: ReminderConfig,
}

impl ReminderScheduler {
    /// 새 스케줄러 생성
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        store: Arc<dyn NotificationStore>,
        hub: Arc<NotificationHub>,
        config: ReminderConfig,
    ) -> Self {
        Self {
            courses,
            enrollments,
            store,
            hub,
            config,
        }
    }

    /// 스캔 루프 실행. 종료 신호가 올 때까지 반환하지 않는다.
    ///
    /// 종료 신호는 한 주기 안에 관찰되며, 진행 중이던 단위 작업은
    /// 멱등이므로 그대로 끝까지 수행된다 (강제 중단 없음).
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "리마인더 스케줄러 시작: 주기={}초, horizon={}시간",
            self.config.scan_interval_secs, self.config.horizon_hours
        );

        let mut interval = tokio::time::interval(self.config.scan_interval());

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let outcome = self.scan_once().await;
                    debug!(
                        "리마인더 스캔 완료: 대상 세션={}, 생성={}, 스킵={}, 실패={}",
                        outcome.scanned_slots, outcome.created, outcome.skipped, outcome.failed
                    );
                }
                _ = shutdown_rx.changed() => {
                    info!("리마인더 스케줄러 종료");
                    break;
                }
            }
        }
    }

    /// 현재 시각 기준으로 한 번 스캔
    pub async fn scan_once(&self) -> ScanOutcome {
        self.scan_at(Local::now().naive_local()).await
    }

    /// 주어진 시각 기준으로 한 번 스캔 (시각 주입은 테스트용).
    ///
    /// 세션 하나, 사용자 하나의 실패는 로그 후 격리한다 — 나머지 스캔은
    /// 계속된다. 이 메서드 자체는 절대 에러를 반환하지 않는다.
    pub async fn scan_at(&self, now: NaiveDateTime) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let limit = now + self.config.horizon();

        let slots = match self.courses.slots_starting_within(now, limit).await {
            Ok(slots) => slots,
            Err(e) => {
                warn!("리마인더 스캔 조회 실패: {e}");
                outcome.failed += 1;
                return outcome;
            }
        };

        for slot in slots {
            // 포트 구현과 무관하게 경계를 한 번 더 강제: (now, limit] 엄격 준수
            let start = slot.interval.start_datetime();
            if !(now < start && start <= limit) {
                continue;
            }
            outcome.scanned_slots += 1;

            if let Err(e) = self.process_slot(&slot, &mut outcome).await {
                warn!("세션 리마인더 처리 실패: slot={}, {e}", slot.id);
                outcome.failed += 1;
            }
        }

        outcome
    }

    /// 세션 하나 처리: 강좌/튜터 해석, 수강생 열거, 수신자별 리마인더 시도
    async fn process_slot(
        &self,
        slot: &SessionSlot,
        outcome: &mut ScanOutcome,
    ) -> Result<(), CoreError> {
        let course = self
            .courses
            .find_course(slot.course_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Course", slot.course_id))?;

        let mut recipients = self.enrollments.enrolled_tutees(course.id).await?;
        recipients.push(course.tutor_id.clone());

        for user_id in recipients {
            match self.remind_user(&user_id, &course, slot).await {
                Ok(true) => outcome.created += 1,
                Ok(false) => outcome.skipped += 1,
                Err(e) => {
                    // 사용자 한 명의 실패가 나머지 수신자를 막지 않는다
                    warn!(
                        "리마인더 생성 실패: user={}, slot={}, {e}",
                        user_id, slot.id
                    );
                    outcome.failed += 1;
                }
            }
        }
        Ok(())
    }

    /// (사용자, 세션) 쌍에 대해 정확히 한 건의 리마인더 시도.
    ///
    /// 이미 있으면 멱등 no-op (false 반환). 없으면 생성 후 허브로 푸시.
    async fn remind_user(
        &self,
        user_id: &str,
        course: &Course,
        slot: &SessionSlot,
    ) -> Result<bool, CoreError> {
        let existing = self
            .store
            .find_by_user_and_related(user_id, slot.id, NotificationType::SessionReminder)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let content = format!(
            "Your session for '{}' starts at {} on {}. Format: {}, location: {}",
            course.title,
            slot.interval.start.format("%H:%M"),
            slot.interval.date,
            slot.format,
            slot.location.as_deref().unwrap_or("-"),
        );

        let created = self
            .store
            .create(NewNotification {
                user_id: user_id.to_string(),
                notification_type: NotificationType::SessionReminder,
                title: "Upcoming Session Reminder".to_string(),
                content,
                related_id: Some(slot.id),
            })
            .await?;

        // 푸시는 best-effort — 오프라인 사용자는 다음 접속 때 REST로 조회한다
        if let Err(e) = self
            .hub
            .send_personal_message(&PushMessage::from_notification(&created), user_id)
        {
            warn!("리마인더 푸시 실패: user={}, {e}", user_id);
        }

        Ok(true)
    }
}
