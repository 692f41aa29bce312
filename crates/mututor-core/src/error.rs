//! MUTutor 핵심 에러 타입.
//!
//! 어댑터 crate는 자체 에러를 `CoreError`로 래핑해 포트 경계를 넘긴다.
//! 시간 충돌(ScheduleConflict/RoomConflict)은 에러가 아니라 데이터로
//! 반환된다 — 이 enum에는 충돌 variant가 없다.

use thiserror::Error;

/// 코어 레이어 에러.
///
/// - 호출자 잘못 (입력 오류): [`CoreError::Validation`], [`CoreError::NotFound`]
/// - 협력자 장애 (재시도 가능): [`CoreError::Storage`], [`CoreError::Collaborator`]
#[derive(Debug, Error)]
pub enum CoreError {
    /// 필드 유효성 검증 실패 (잘못된 시간 구간 등)
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Course", "SessionSlot", "Room")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 저장소 에러 (SQLite 실패 등)
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 외부 협력자 에러 (강의실 예약 백엔드 등)
    #[error("협력자 에러: {0}")]
    Collaborator(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 미발견 에러 생성 헬퍼
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        CoreError::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// 재시도 가능한 협력자/저장소 장애 여부
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Storage(_) | CoreError::Collaborator(_))
    }
}
