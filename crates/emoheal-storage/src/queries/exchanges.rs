// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange record operations.

use std::str::FromStr;

use rusqlite::params;

use emoheal_core::{EmohealError, RiskTier, SentimentScores};

use crate::database::Database;
use crate::models::ExchangeRecord;

const EXCHANGE_COLUMNS: &str = "id, user_id, session_id, user_message, bot_response, \
     sentiment_compound, sentiment_positive, sentiment_negative, sentiment_neutral, \
     emotions, topics, risk_tier, risk_confidence, created_at";

/// Append one exchange record.
pub async fn insert_exchange(db: &Database, record: &ExchangeRecord) -> Result<(), EmohealError> {
    let record = record.clone();
    let emotions_json = serde_json::to_string(&record.emotions).map_err(|e| {
        EmohealError::Storage {
            source: Box::new(e),
        }
    })?;
    let topics_json = serde_json::to_string(&record.topics).map_err(|e| {
        EmohealError::Storage {
            source: Box::new(e),
        }
    })?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO exchanges (id, user_id, session_id, user_message, bot_response,
                     sentiment_compound, sentiment_positive, sentiment_negative, sentiment_neutral,
                     emotions, topics, risk_tier, risk_confidence, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    record.id,
                    record.user_id,
                    record.session_id,
                    record.user_message,
                    record.bot_response,
                    record.sentiment.map(|s| s.compound),
                    record.sentiment.map(|s| s.positive),
                    record.sentiment.map(|s| s.negative),
                    record.sentiment.map(|s| s.neutral),
                    emotions_json,
                    topics_json,
                    record.risk_tier.to_string(),
                    record.risk_confidence,
                    record.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Total exchange count for a user.
pub async fn count_for_user(db: &Database, user_id: &str) -> Result<i64, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM exchanges WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// One page of a user's exchanges, newest first.
pub async fn page_for_user(
    db: &Database,
    user_id: &str,
    limit: i64,
    skip: i64,
) -> Result<Vec<ExchangeRecord>, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {EXCHANGE_COLUMNS} FROM exchanges WHERE user_id = ?1
                 ORDER BY created_at DESC LIMIT ?2 OFFSET ?3"
            ))?;
            let rows = stmt.query_map(params![user_id, limit, skip], row_to_exchange)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A user's exchanges at or after the RFC 3339 cutoff, oldest first.
pub async fn since_for_user(
    db: &Database,
    user_id: &str,
    cutoff: &str,
) -> Result<Vec<ExchangeRecord>, EmohealError> {
    let user_id = user_id.to_string();
    let cutoff = cutoff.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {EXCHANGE_COLUMNS} FROM exchanges
                 WHERE user_id = ?1 AND created_at >= ?2
                 ORDER BY created_at ASC"
            ))?;
            let rows = stmt.query_map(params![user_id, cutoff], row_to_exchange)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of distinct sessions a user has had.
pub async fn distinct_sessions(db: &Database, user_id: &str) -> Result<i64, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(DISTINCT session_id) FROM exchanges WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Timestamp of a user's most recent exchange, if any.
pub async fn latest_created_at(
    db: &Database,
    user_id: &str,
) -> Result<Option<String>, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let latest = conn.query_row(
                "SELECT MAX(created_at) FROM exchanges WHERE user_id = ?1",
                params![user_id],
                |row| row.get::<_, Option<String>>(0),
            )?;
            Ok(latest)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Maps a SELECT row (in EXCHANGE_COLUMNS order) to an ExchangeRecord.
fn row_to_exchange(row: &rusqlite::Row<'_>) -> rusqlite::Result<ExchangeRecord> {
    let compound: Option<f64> = row.get(5)?;
    let sentiment = match compound {
        Some(compound) => Some(SentimentScores {
            compound,
            positive: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
            negative: row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
            neutral: row.get::<_, Option<f64>>(8)?.unwrap_or(0.0),
        }),
        None => None,
    };

    let emotions_json: String = row.get(9)?;
    let emotions: Vec<String> = serde_json::from_str(&emotions_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let topics_json: String = row.get(10)?;
    let topics: Vec<String> = serde_json::from_str(&topics_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let tier_str: String = row.get(11)?;
    let risk_tier = RiskTier::from_str(&tier_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ExchangeRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        session_id: row.get(2)?,
        user_message: row.get(3)?,
        bot_response: row.get(4)?,
        sentiment,
        emotions,
        topics,
        risk_tier,
        risk_confidence: row.get(12)?,
        created_at: row.get(13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn make_exchange(id: &str, timestamp: &str) -> ExchangeRecord {
        ExchangeRecord {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            session_id: "sess-1".to_string(),
            user_message: "I feel anxious".to_string(),
            bot_response: "Tell me more.".to_string(),
            sentiment: Some(SentimentScores {
                compound: -0.493,
                positive: 0.0,
                negative: 0.354,
                neutral: 0.646,
            }),
            emotions: vec!["anxiety".to_string()],
            topics: vec!["work".to_string()],
            risk_tier: RiskTier::Low,
            risk_confidence: 0.1,
            created_at: timestamp.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_page_round_trips() {
        let (db, _dir) = setup_db().await;

        let e1 = make_exchange("e1", "2026-01-01T00:00:01.000Z");
        let e2 = make_exchange("e2", "2026-01-01T00:00:02.000Z");
        insert_exchange(&db, &e1).await.unwrap();
        insert_exchange(&db, &e2).await.unwrap();

        let page = page_for_user(&db, "user-1", 10, 0).await.unwrap();
        assert_eq!(page.len(), 2);
        // Newest first.
        assert_eq!(page[0].id, "e2");
        assert_eq!(page[1], e1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn crisis_row_round_trips_without_sentiment() {
        let (db, _dir) = setup_db().await;

        let mut record = make_exchange("crisis-1", "2026-01-01T00:00:01.000Z");
        record.bot_response = emoheal_core::CRISIS_SENTINEL.to_string();
        record.sentiment = None;
        record.emotions = vec![];
        record.topics = vec![];
        record.risk_tier = RiskTier::High;
        record.risk_confidence = 0.95;
        insert_exchange(&db, &record).await.unwrap();

        let page = page_for_user(&db, "user-1", 10, 0).await.unwrap();
        assert_eq!(page[0].bot_response, "CRISIS_ALERT");
        assert!(page[0].sentiment.is_none());
        assert!(page[0].emotions.is_empty());
        assert_eq!(page[0].risk_tier, RiskTier::High);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn pagination_skips_and_limits() {
        let (db, _dir) = setup_db().await;

        for i in 0..5 {
            let e = make_exchange(&format!("e{i}"), &format!("2026-01-01T00:00:0{i}.000Z"));
            insert_exchange(&db, &e).await.unwrap();
        }

        let page = page_for_user(&db, "user-1", 2, 1).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "e3");
        assert_eq!(page[1].id, "e2");

        assert_eq!(count_for_user(&db, "user-1").await.unwrap(), 5);
        assert_eq!(count_for_user(&db, "someone-else").await.unwrap(), 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn since_filters_by_cutoff_oldest_first() {
        let (db, _dir) = setup_db().await;

        for (id, ts) in [
            ("old", "2026-01-01T00:00:00.000Z"),
            ("mid", "2026-01-05T00:00:00.000Z"),
            ("new", "2026-01-09T00:00:00.000Z"),
        ] {
            insert_exchange(&db, &make_exchange(id, ts)).await.unwrap();
        }

        let recent = since_for_user(&db, "user-1", "2026-01-05T00:00:00.000Z")
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "mid");
        assert_eq!(recent[1].id, "new");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn session_and_latest_statistics() {
        let (db, _dir) = setup_db().await;

        let mut a = make_exchange("a", "2026-01-01T00:00:01.000Z");
        a.session_id = "sess-1".to_string();
        let mut b = make_exchange("b", "2026-01-02T00:00:01.000Z");
        b.session_id = "sess-2".to_string();
        insert_exchange(&db, &a).await.unwrap();
        insert_exchange(&db, &b).await.unwrap();

        assert_eq!(distinct_sessions(&db, "user-1").await.unwrap(), 2);
        assert_eq!(
            latest_created_at(&db, "user-1").await.unwrap().as_deref(),
            Some("2026-01-02T00:00:01.000Z")
        );
        assert_eq!(latest_created_at(&db, "ghost").await.unwrap(), None);

        db.close().await.unwrap();
    }
}
