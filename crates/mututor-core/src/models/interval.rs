//! 시간 구간 모델.
//!
//! 하루 안의 반개구간 [start, end)을 표현한다. 모든 충돌 판정이
//! 이 타입의 `overlaps` 하나로 귀결되므로 의미가 흔들리면 안 된다:
//! 같은 날짜 + 구간 겹침일 때만 충돌이고, 끝점이 맞닿은 두 구간
//! (예: 10:00–12:00과 12:00–14:00)은 충돌이 아니다.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 하루 안의 시간 구간 — 반개구간 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// 날짜
    pub date: NaiveDate,
    /// 시작 시각 (포함)
    pub start: NaiveTime,
    /// 종료 시각 (비포함)
    pub end: NaiveTime,
}

impl TimeInterval {
    /// 새 시간 구간 생성. `start < end`가 아니면 Validation 에러.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::Validation {
                field: "interval".to_string(),
                message: format!("시작 시각({start})이 종료 시각({end})보다 빨라야 합니다"),
            });
        }
        Ok(Self { date, start, end })
    }

    /// 두 구간의 겹침 판정.
    ///
    /// 반개구간 의미론: `a.end <= b.start` 또는 `b.end <= a.start`이면
    /// 겹치지 않는다. 날짜가 다르면 항상 false. 대칭적이다.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.date == other.date && !(self.end <= other.start || other.end <= self.start)
    }

    /// 구간 시작 시점의 날짜+시각
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.date,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn interval(date: &str, start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(
            date.parse().unwrap(),
            format!("{start}:00").parse().unwrap(),
            format!("{end}:00").parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_interval() {
        let result = TimeInterval::new(
            "2025-11-13".parse().unwrap(),
            "12:00:00".parse().unwrap(),
            "10:00:00".parse().unwrap(),
        );
        assert_matches!(result, Err(CoreError::Validation { .. }));
    }

    #[test]
    fn rejects_empty_interval() {
        let result = TimeInterval::new(
            "2025-11-13".parse().unwrap(),
            "10:00:00".parse().unwrap(),
            "10:00:00".parse().unwrap(),
        );
        assert_matches!(result, Err(CoreError::Validation { .. }));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let a = interval("2025-11-13", "10:00", "12:00");
        let b = interval("2025-11-13", "12:00", "14:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partial_overlap_detected() {
        let a = interval("2025-11-13", "10:00", "12:00");
        let b = interval("2025-11-13", "11:00", "13:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = interval("2025-11-13", "09:00", "17:00");
        let inner = interval("2025-11-13", "10:00", "11:00");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn identical_intervals_overlap() {
        let a = interval("2025-11-13", "10:00", "12:00");
        assert!(a.overlaps(&a));
    }

    #[test]
    fn different_dates_never_overlap() {
        let a = interval("2025-11-13", "10:00", "12:00");
        let b = interval("2025-11-14", "10:00", "12:00");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn overlap_is_symmetric_over_grid() {
        // 같은 날짜의 시각 조합 전수에 대해 대칭성 확인
        let date = "2025-11-13";
        let hours = ["08:00", "10:00", "12:00", "14:00"];
        let mut intervals = Vec::new();
        for (i, start) in hours.iter().enumerate() {
            for end in &hours[i + 1..] {
                intervals.push(interval(date, start, end));
            }
        }
        for a in &intervals {
            for b in &intervals {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn start_datetime_combines_date_and_time() {
        let a = interval("2025-11-13", "14:00", "16:00");
        assert_eq!(
            a.start_datetime(),
            "2025-11-13T14:00:00".parse::<NaiveDateTime>().unwrap()
        );
    }
}
