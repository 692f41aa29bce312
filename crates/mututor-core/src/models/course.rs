//! 강좌 및 세션 슬롯 모델.

use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;

/// 강좌 — 튜터가 소유하며 세션 슬롯들을 가진다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// 강좌 ID
    pub id: i64,
    /// 소유 튜터 ID
    pub tutor_id: String,
    /// 강좌 제목
    pub title: String,
}

/// 세션 진행 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFormat {
    /// 온라인 세션
    Online,
    /// 오프라인 세션 (강의실 필요)
    Offline,
}

impl SessionFormat {
    /// 와이어/저장 포맷과 동일한 소문자 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionFormat::Online => "online",
            SessionFormat::Offline => "offline",
        }
    }
}

impl std::fmt::Display for SessionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 세션 슬롯 — 강좌에 속한 개별 수업 시간
///
/// 충돌 판정과 리마인더 스캔의 단위. `related_id`로 알림과 연결된다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSlot {
    /// 슬롯 ID
    pub id: i64,
    /// 소속 강좌 ID
    pub course_id: i64,
    /// 강좌 내 회차 번호 (1부터)
    pub number: u32,
    /// 수업 시간 구간
    pub interval: TimeInterval,
    /// 진행 방식
    pub format: SessionFormat,
    /// 장소 (오프라인이면 강의실 이름, 온라인이면 접속 URL 등)
    pub location: Option<String>,
}
