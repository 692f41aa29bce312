//! # mututor-storage
//!
//! 저장소 어댑터.
//!
//! - [`sqlite`] — `NotificationStore` + `CourseRepository` + `EnrollmentRepository`
//!   포트의 rusqlite 구현
//! - [`memory`] — 외부 강의실 백엔드를 대신하는 인메모리 `RoomCalendar`
//!   (개발/테스트용)

pub mod memory;
pub mod migration;
pub mod sqlite;

pub use memory::StaticRoomCalendar;
pub use sqlite::SqliteStorage;
