//! # mututor-schedule
//!
//! 일정 엔진: 시간 충돌 탐지와 세션 리마인더 스케줄러.
//!
//! - [`conflict`] — 튜터/수강/강의실 축의 충돌 탐지 ([`ConflictDetector`])
//! - [`reminder`] — 주기 스캔 + 알림 생성/푸시 ([`ReminderScheduler`])
//!
//! 두 컴포넌트 모두 `mututor-core`의 포트를 통해서만 데이터에 접근한다.

pub mod conflict;
pub mod reminder;

pub use conflict::ConflictDetector;
pub use reminder::{ReminderScheduler, ScanOutcome};
