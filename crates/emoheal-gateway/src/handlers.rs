// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the read-only query endpoints.
//!
//! Storage failures surface as 500 responses with the error detail in the
//! body; the database health probe always answers 200 with a status payload.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use emoheal_core::{CrisisAlert, EmohealError, ExchangeRecord, HealthStatus};

use crate::summary::{self, DailySentiment, EmotionCount};
use crate::GatewayState;

/// Query parameters for GET /api/chat-history/{user_id}.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
}

/// Query parameters for GET /api/mood-summary/{user_id}.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    #[serde(default)]
    pub days: Option<i64>,
}

/// Query parameters for GET /api/crisis-alerts/{user_id}.
#[derive(Debug, Deserialize)]
pub struct AlertParams {
    #[serde(default)]
    pub resolved: Option<bool>,
}

/// Response body for GET /api/chat-history/{user_id}.
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub success: bool,
    pub user_id: String,
    pub history: Vec<ExchangeRecord>,
    pub count: usize,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

/// Response body for GET /api/mood-summary/{user_id}.
#[derive(Debug, Serialize)]
pub struct MoodSummaryResponse {
    pub success: bool,
    pub user_id: String,
    pub period_days: i64,
    pub total_messages: usize,
    pub emotion_distribution: BTreeMap<String, i64>,
    pub top_emotions: Vec<EmotionCount>,
    pub average_sentiment: f64,
    pub sentiment_trend: BTreeMap<String, DailySentiment>,
    pub analysis_date: String,
}

/// Response body for GET /api/crisis-alerts/{user_id}.
#[derive(Debug, Serialize)]
pub struct CrisisAlertsResponse {
    pub success: bool,
    pub user_id: String,
    pub alerts: Vec<CrisisAlert>,
    pub count: usize,
    pub unresolved_count: i64,
}

/// Response body for GET /api/user-stats/{user_id}.
#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub success: bool,
    pub user_id: String,
    pub total_messages: i64,
    pub total_sessions: i64,
    pub crisis_alerts: i64,
    pub last_message_time: Option<String>,
}

/// Response body for GET /api/health/database.
#[derive(Debug, Serialize)]
pub struct DatabaseHealthResponse {
    pub success: bool,
    pub database: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Renders a storage failure as a 500 with detail.
fn storage_error(e: EmohealError) -> Response {
    tracing::error!(error = %e, "query endpoint storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// GET /
///
/// Service banner with the endpoint map.
pub async fn get_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "EmoHeal Support Chat API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "websocket_chat": "/ws/chat/{user_id}",
            "health": "/health",
            "database_health": "/api/health/database",
            "chat_history": "/api/chat-history/{user_id}",
            "mood_summary": "/api/mood-summary/{user_id}",
            "crisis_alerts": "/api/crisis-alerts/{user_id}",
            "user_stats": "/api/user-stats/{user_id}",
        },
    }))
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "emoheal-support-chat".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/chat-history/{user_id}
///
/// One page of the user's exchanges, newest first.
pub async fn get_chat_history(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(50)
        .clamp(1, state.limits.history_page_limit);
    let skip = params.skip.unwrap_or(0).max(0);

    let total = match state.storage.count_exchanges(&user_id).await {
        Ok(total) => total,
        Err(e) => return storage_error(e),
    };
    let history = match state.storage.get_exchanges(&user_id, limit, skip).await {
        Ok(history) => history,
        Err(e) => return storage_error(e),
    };

    tracing::info!(
        user_id = user_id.as_str(),
        count = history.len(),
        "chat history retrieved"
    );

    Json(ChatHistoryResponse {
        success: true,
        user_id,
        count: history.len(),
        history,
        total,
        skip,
        limit,
    })
    .into_response()
}

/// GET /api/mood-summary/{user_id}
///
/// Emotion distribution, top-5 emotions, average sentiment, and per-day
/// trend over a configurable day window.
pub async fn get_mood_summary(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
    Query(params): Query<SummaryParams>,
) -> Response {
    let days = params
        .days
        .unwrap_or(state.limits.default_days)
        .clamp(1, state.limits.max_days);

    let now = chrono::Utc::now();
    let cutoff = (now - chrono::Duration::days(days))
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let records = match state.storage.get_exchanges_since(&user_id, &cutoff).await {
        Ok(records) => records,
        Err(e) => return storage_error(e),
    };

    let summary = summary::aggregate(&records);

    tracing::info!(
        user_id = user_id.as_str(),
        days,
        messages = records.len(),
        "mood summary generated"
    );

    Json(MoodSummaryResponse {
        success: true,
        user_id,
        period_days: days,
        total_messages: records.len(),
        emotion_distribution: summary.emotion_distribution,
        top_emotions: summary.top_emotions,
        average_sentiment: summary.average_sentiment,
        sentiment_trend: summary.sentiment_trend,
        analysis_date: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
    .into_response()
}

/// GET /api/crisis-alerts/{user_id}
pub async fn get_crisis_alerts(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
    Query(params): Query<AlertParams>,
) -> Response {
    let alerts = match state.storage.list_alerts(&user_id, params.resolved).await {
        Ok(alerts) => alerts,
        Err(e) => return storage_error(e),
    };
    let unresolved_count = match state.storage.count_unresolved_alerts(&user_id).await {
        Ok(count) => count,
        Err(e) => return storage_error(e),
    };

    tracing::info!(
        user_id = user_id.as_str(),
        count = alerts.len(),
        "crisis alerts retrieved"
    );

    Json(CrisisAlertsResponse {
        success: true,
        user_id,
        count: alerts.len(),
        alerts,
        unresolved_count,
    })
    .into_response()
}

/// GET /api/user-stats/{user_id}
pub async fn get_user_stats(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
) -> Response {
    let total_messages = match state.storage.count_exchanges(&user_id).await {
        Ok(count) => count,
        Err(e) => return storage_error(e),
    };
    let total_sessions = match state.storage.count_sessions(&user_id).await {
        Ok(count) => count,
        Err(e) => return storage_error(e),
    };
    let crisis_alerts = match state.storage.count_alerts(&user_id).await {
        Ok(count) => count,
        Err(e) => return storage_error(e),
    };
    let last_message_time = match state.storage.latest_exchange_at(&user_id).await {
        Ok(latest) => latest,
        Err(e) => return storage_error(e),
    };

    Json(UserStatsResponse {
        success: true,
        user_id,
        total_messages,
        total_sessions,
        crisis_alerts,
        last_message_time,
    })
    .into_response()
}

/// GET /api/health/database
///
/// Always answers 200 with a status payload, healthy or not.
pub async fn get_database_health(State(state): State<GatewayState>) -> Json<DatabaseHealthResponse> {
    match state.storage.health_check().await {
        Ok(HealthStatus::Healthy) => Json(DatabaseHealthResponse {
            success: true,
            database: "connected".to_string(),
            status: "healthy".to_string(),
            error: None,
        }),
        Ok(HealthStatus::Degraded(detail)) => Json(DatabaseHealthResponse {
            success: true,
            database: "connected".to_string(),
            status: "degraded".to_string(),
            error: Some(detail),
        }),
        Ok(HealthStatus::Unhealthy(detail)) => Json(DatabaseHealthResponse {
            success: false,
            database: "disconnected".to_string(),
            status: "unhealthy".to_string(),
            error: Some(detail),
        }),
        Err(e) => {
            tracing::error!(error = %e, "database health check failed");
            Json(DatabaseHealthResponse {
                success: false,
                database: "disconnected".to_string(),
                status: "unhealthy".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_params_deserialize_with_defaults() {
        let params: HistoryParams = serde_json::from_str("{}").unwrap();
        assert!(params.limit.is_none());
        assert!(params.skip.is_none());
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            success: false,
            error: "storage error: disk full".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("disk full"));
    }

    #[test]
    fn database_health_omits_error_when_healthy() {
        let resp = DatabaseHealthResponse {
            success: true,
            database: "connected".to_string(),
            status: "healthy".to_string(),
            error: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("error"));
    }

    #[test]
    fn user_stats_response_serializes_null_last_message() {
        let resp = UserStatsResponse {
            success: true,
            user_id: "u1".to_string(),
            total_messages: 0,
            total_sessions: 0,
            crisis_alerts: 0,
            last_message_time: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"last_message_time\":null"));
    }
}
