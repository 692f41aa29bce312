//! 수강 신청 저장소 포트.
//!
//! 구현: `mututor-storage` crate (rusqlite)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::enrollment::{Enrollment, EnrollmentStatus};

/// 수강 신청 조회 인터페이스
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// 튜티의 특정 상태 수강 신청 목록
    async fn enrollments_by_tutee(
        &self,
        tutee_id: &str,
        status: EnrollmentStatus,
    ) -> Result<Vec<Enrollment>, CoreError>;

    /// 강좌의 수강 중(ENROLLED)인 튜티 ID 목록
    async fn enrolled_tutees(&self, course_id: i64) -> Result<Vec<String>, CoreError>;
}
