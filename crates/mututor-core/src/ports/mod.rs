//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate(`mututor-storage` 등)가 이 trait들을 구현하며,
//! `mututor-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 모든 async trait은 `async_trait` 매크로를 사용하여
//! object safety를 보장한다.

pub mod course_repo;
pub mod enrollment_repo;
pub mod notification_store;
pub mod room_calendar;

pub use course_repo::CourseRepository;
pub use enrollment_repo::EnrollmentRepository;
pub use notification_store::NotificationStore;
pub use room_calendar::RoomCalendar;
