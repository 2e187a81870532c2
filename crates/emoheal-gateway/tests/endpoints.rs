// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query endpoint tests over a real router and SQLite storage.

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

use emoheal_config::model::StorageConfig;
use emoheal_config::EmohealConfig;
use emoheal_core::{CrisisAlert, ExchangeRecord, RiskTier, SentimentScores, StorageAdapter};
use emoheal_gateway::server::build_router;
use emoheal_gateway::{GatewayState, QueryLimits};
use emoheal_session::TherapyEngine;
use emoheal_storage::SqliteStorage;
use tempfile::tempdir;

async fn setup(dir: &tempfile::TempDir) -> (axum::Router, Arc<SqliteStorage>) {
    let db_path = dir.path().join("endpoints.db");
    let storage = Arc::new(SqliteStorage::new(StorageConfig {
        database_path: db_path.to_str().unwrap().to_string(),
        wal_mode: true,
    }));
    storage.initialize().await.unwrap();

    let engine = Arc::new(TherapyEngine::from_config(&EmohealConfig::default()).unwrap());
    let state = GatewayState {
        storage: storage.clone(),
        engine,
        welcome_message: Arc::from("Hello!"),
        limits: QueryLimits::default(),
        start_time: std::time::Instant::now(),
    };
    (build_router(state, true), storage)
}

fn recent_timestamp(hours_ago: i64) -> String {
    (chrono::Utc::now() - chrono::Duration::hours(hours_ago))
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn exchange(id: &str, emotions: &[&str], compound: f64, created_at: &str) -> ExchangeRecord {
    ExchangeRecord {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        session_id: "sess-1".to_string(),
        user_message: "msg".to_string(),
        bot_response: "reply".to_string(),
        sentiment: Some(SentimentScores {
            compound,
            positive: 0.0,
            negative: 0.2,
            neutral: 0.8,
        }),
        emotions: emotions.iter().map(|e| e.to_string()).collect(),
        topics: vec![],
        risk_tier: RiskTier::Low,
        risk_confidence: 0.1,
        created_at: created_at.to_string(),
    }
}

async fn get_json(router: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn root_banner_lists_endpoints() {
    let dir = tempdir().unwrap();
    let (router, _storage) = setup(&dir).await;

    let (status, json) = get_json(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], "EmoHeal Support Chat API");
    assert_eq!(json["status"], "running");
    assert_eq!(json["endpoints"]["websocket_chat"], "/ws/chat/{user_id}");
}

#[tokio::test]
async fn health_reports_service_liveness() {
    let dir = tempdir().unwrap();
    let (router, _storage) = setup(&dir).await;

    let (status, json) = get_json(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "emoheal-support-chat");
}

#[tokio::test]
async fn database_health_probe_answers_healthy() {
    let dir = tempdir().unwrap();
    let (router, _storage) = setup(&dir).await;

    let (status, json) = get_json(&router, "/api/health/database").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["database"], "connected");
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn chat_history_paginates_newest_first() {
    let dir = tempdir().unwrap();
    let (router, storage) = setup(&dir).await;

    for i in 0..3 {
        storage
            .insert_exchange(&exchange(
                &format!("e{i}"),
                &[],
                0.0,
                &format!("2026-01-01T00:00:0{i}.000Z"),
            ))
            .await
            .unwrap();
    }

    let (status, json) = get_json(&router, "/api/chat-history/user-1?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["total"], 3);
    assert_eq!(json["count"], 2);
    assert_eq!(json["limit"], 2);
    assert_eq!(json["skip"], 0);
    assert_eq!(json["history"][0]["id"], "e2");
    assert_eq!(json["history"][1]["id"], "e1");

    // Second page.
    let (_, json) = get_json(&router, "/api/chat-history/user-1?limit=2&skip=2").await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["history"][0]["id"], "e0");
}

#[tokio::test]
async fn chat_history_clamps_oversized_limit() {
    let dir = tempdir().unwrap();
    let (router, _storage) = setup(&dir).await;

    let (status, json) = get_json(&router, "/api/chat-history/user-1?limit=99999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["limit"], 500);
}

#[tokio::test]
async fn mood_summary_aggregates_week_window() {
    let dir = tempdir().unwrap();
    let (router, storage) = setup(&dir).await;

    // 4 anxiety at -0.2, 6 sadness at -0.5, all within the last week.
    for i in 0..4 {
        storage
            .insert_exchange(&exchange(
                &format!("a{i}"),
                &["anxiety"],
                -0.2,
                &recent_timestamp(10),
            ))
            .await
            .unwrap();
    }
    for i in 0..6 {
        storage
            .insert_exchange(&exchange(
                &format!("s{i}"),
                &["sadness"],
                -0.5,
                &recent_timestamp(30),
            ))
            .await
            .unwrap();
    }
    // One stale record outside the window must not count.
    storage
        .insert_exchange(&exchange("old", &["anger"], -0.9, "2020-01-01T00:00:00.000Z"))
        .await
        .unwrap();

    let (status, json) = get_json(&router, "/api/mood-summary/user-1?days=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["period_days"], 7);
    assert_eq!(json["total_messages"], 10);
    assert_eq!(json["top_emotions"][0]["emotion"], "sadness");
    assert_eq!(json["top_emotions"][0]["count"], 6);
    assert_eq!(json["top_emotions"][1]["emotion"], "anxiety");
    assert_eq!(json["top_emotions"][1]["count"], 4);
    // Mean of 4 * -0.2 and 6 * -0.5, rounded to 3 decimals.
    assert_eq!(json["average_sentiment"], -0.38);
    assert!(json["emotion_distribution"].get("anger").is_none());
}

#[tokio::test]
async fn crisis_alerts_filter_by_resolved() {
    let dir = tempdir().unwrap();
    let (router, storage) = setup(&dir).await;

    for (id, resolved) in [("a1", false), ("a2", true), ("a3", false)] {
        storage
            .insert_alert(&CrisisAlert {
                id: id.to_string(),
                user_id: "user-1".to_string(),
                session_id: "sess-1".to_string(),
                trigger_message: "trigger".to_string(),
                detected_keywords: vec!["kill myself".to_string()],
                resolved,
                created_at: recent_timestamp(1),
            })
            .await
            .unwrap();
    }

    let (status, json) = get_json(&router, "/api/crisis-alerts/user-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(json["unresolved_count"], 2);

    let (_, json) = get_json(&router, "/api/crisis-alerts/user-1?resolved=false").await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["unresolved_count"], 2);
}

#[tokio::test]
async fn user_stats_cover_messages_sessions_and_alerts() {
    let dir = tempdir().unwrap();
    let (router, storage) = setup(&dir).await;

    let mut first = exchange("e1", &[], 0.0, "2026-01-01T00:00:01.000Z");
    first.session_id = "sess-1".to_string();
    let mut second = exchange("e2", &[], 0.0, "2026-01-02T00:00:01.000Z");
    second.session_id = "sess-2".to_string();
    storage.insert_exchange(&first).await.unwrap();
    storage.insert_exchange(&second).await.unwrap();

    let (status, json) = get_json(&router, "/api/user-stats/user-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_messages"], 2);
    assert_eq!(json["total_sessions"], 2);
    assert_eq!(json["crisis_alerts"], 0);
    assert_eq!(json["last_message_time"], "2026-01-02T00:00:01.000Z");
}

#[tokio::test]
async fn unknown_user_yields_empty_results_not_errors() {
    let dir = tempdir().unwrap();
    let (router, _storage) = setup(&dir).await;

    let (status, json) = get_json(&router, "/api/chat-history/ghost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 0);

    let (status, json) = get_json(&router, "/api/user-stats/ghost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["last_message_time"], serde_json::Value::Null);
}
