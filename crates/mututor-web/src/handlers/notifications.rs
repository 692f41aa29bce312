//! 알림 REST 핸들러.
//!
//! 인증은 상위 게이트웨이 소관이므로 사용자 ID를 명시적 파라미터로 받는다.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use mututor_core::models::notification::Notification;

use crate::error::ApiError;
use crate::AppState;

/// GET /api/notifications 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 대상 사용자
    pub user_id: String,
    /// 안 읽은 알림만
    #[serde(default)]
    pub unread_only: bool,
}

/// 알림 목록 응답
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// 처리 상태
    pub status: String,
    /// 대상 사용자
    pub user_id: String,
    /// 알림 수
    pub count: usize,
    /// 알림 목록 (최신순)
    pub notifications: Vec<Notification>,
}

/// 사용자의 알림 목록 조회
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let notifications = state
        .store
        .list_by_user(&query.user_id, query.unread_only)
        .await?;

    Ok(Json(ListResponse {
        status: "success".to_string(),
        user_id: query.user_id,
        count: notifications.len(),
        notifications,
    }))
}

/// POST /api/notifications/read 요청 본문
#[derive(Debug, Deserialize)]
pub struct ReadRequest {
    /// 요청 사용자 (본인 알림만 읽음 처리 가능)
    pub user_id: String,
    /// 읽음 처리할 알림 ID
    #[serde(default)]
    pub id: Option<i64>,
    /// true면 사용자의 안 읽은 알림 전체 읽음 처리
    #[serde(default)]
    pub mark_all: bool,
}

/// 읽음 처리 응답
#[derive(Debug, Serialize)]
pub struct ReadResponse {
    /// 처리 상태
    pub status: String,
    /// 안내 메시지
    pub message: String,
    /// 단건 처리 시 갱신된 알림
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// 알림 읽음 처리 (단건 또는 전체)
pub async fn read_notification(
    State(state): State<AppState>,
    Json(request): Json<ReadRequest>,
) -> Result<Json<ReadResponse>, ApiError> {
    if request.mark_all {
        let count = state.store.mark_all_as_read(&request.user_id).await?;
        return Ok(Json(ReadResponse {
            status: "success".to_string(),
            message: format!("알림 {count}건 읽음 처리"),
            notification: None,
        }));
    }

    let id = request
        .id
        .ok_or_else(|| ApiError::BadRequest("알림 id가 필요합니다".to_string()))?;

    let notification = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("알림 미발견: {id}")))?;

    if notification.user_id != request.user_id {
        return Err(ApiError::Forbidden(
            "본인의 알림만 읽음 처리할 수 있습니다".to_string(),
        ));
    }

    let updated = state
        .store
        .mark_as_read(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("알림 미발견: {id}")))?;

    Ok(Json(ReadResponse {
        status: "success".to_string(),
        message: "알림 읽음 처리".to_string(),
        notification: Some(updated),
    }))
}
