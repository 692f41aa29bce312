//! 도메인 데이터 모델.
//!
//! 직렬화 가능한 핵심 구조체들.
//! 충돌 판정 결과([`conflict`])는 에러가 아니라 여기서 정의하는 데이터다.

pub mod conflict;
pub mod course;
pub mod enrollment;
pub mod interval;
pub mod notification;
pub mod room;
