//! 수강 신청 모델.

use serde::{Deserialize, Serialize};

/// 수강 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// 수강 중 — 충돌 판정과 리마인더 대상
    Enrolled,
    /// 수료
    Completed,
    /// 중도 포기
    Dropped,
}

/// 수강 신청 — 튜티와 강좌의 연결
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    /// 수강 신청 ID
    pub id: i64,
    /// 튜티(수강생) ID
    pub tutee_id: String,
    /// 강좌 ID
    pub course_id: i64,
    /// 수강 상태
    pub status: EnrollmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Enrolled).unwrap(),
            "\"enrolled\""
        );
        let parsed: EnrollmentStatus = serde_json::from_str("\"dropped\"").unwrap();
        assert_eq!(parsed, EnrollmentStatus::Dropped);
    }
}
