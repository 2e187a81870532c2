// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crisis alert operations.

use rusqlite::params;

use emoheal_core::EmohealError;

use crate::database::Database;
use crate::models::CrisisAlert;

/// Hard cap on alert listings, mirroring the query endpoint contract.
const LIST_LIMIT: i64 = 100;

const ALERT_COLUMNS: &str =
    "id, user_id, session_id, trigger_message, detected_keywords, resolved, created_at";

/// Append one crisis alert.
pub async fn insert_alert(db: &Database, alert: &CrisisAlert) -> Result<(), EmohealError> {
    let alert = alert.clone();
    let keywords_json = serde_json::to_string(&alert.detected_keywords).map_err(|e| {
        EmohealError::Storage {
            source: Box::new(e),
        }
    })?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO crisis_alerts (id, user_id, session_id, trigger_message,
                     detected_keywords, resolved, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    alert.id,
                    alert.user_id,
                    alert.session_id,
                    alert.trigger_message,
                    keywords_json,
                    alert.resolved,
                    alert.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A user's alerts, newest first, optionally filtered by resolved flag.
pub async fn list_for_user(
    db: &Database,
    user_id: &str,
    resolved: Option<bool>,
) -> Result<Vec<CrisisAlert>, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut alerts = Vec::new();
            match resolved {
                Some(flag) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ALERT_COLUMNS} FROM crisis_alerts
                         WHERE user_id = ?1 AND resolved = ?2
                         ORDER BY created_at DESC LIMIT ?3"
                    ))?;
                    let rows =
                        stmt.query_map(params![user_id, flag, LIST_LIMIT], row_to_alert)?;
                    for row in rows {
                        alerts.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ALERT_COLUMNS} FROM crisis_alerts
                         WHERE user_id = ?1
                         ORDER BY created_at DESC LIMIT ?2"
                    ))?;
                    let rows = stmt.query_map(params![user_id, LIST_LIMIT], row_to_alert)?;
                    for row in rows {
                        alerts.push(row?);
                    }
                }
            }
            Ok(alerts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of a user's unresolved alerts.
pub async fn count_unresolved(db: &Database, user_id: &str) -> Result<i64, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM crisis_alerts WHERE user_id = ?1 AND resolved = 0",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Total alert count for a user.
pub async fn count_for_user(db: &Database, user_id: &str) -> Result<i64, EmohealError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM crisis_alerts WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Maps a SELECT row (in ALERT_COLUMNS order) to a CrisisAlert.
fn row_to_alert(row: &rusqlite::Row<'_>) -> rusqlite::Result<CrisisAlert> {
    let keywords_json: String = row.get(4)?;
    let detected_keywords: Vec<String> = serde_json::from_str(&keywords_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(CrisisAlert {
        id: row.get(0)?,
        user_id: row.get(1)?,
        session_id: row.get(2)?,
        trigger_message: row.get(3)?,
        detected_keywords,
        resolved: row.get(5)?,
        created_at: row.get(6)?,
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

    fn make_alert(id: &str, resolved: bool, timestamp: &str) -> CrisisAlert {
        CrisisAlert {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            session_id: "sess-1".to_string(),
            trigger_message: "I want to kill myself".to_string(),
            detected_keywords: vec!["kill myself".to_string()],
            resolved,
            created_at: timestamp.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_list_round_trips() {
        let (db, _dir) = setup_db().await;
        let alert = make_alert("a1", false, "2026-01-01T00:00:01.000Z");
        insert_alert(&db, &alert).await.unwrap();

        let listed = list_for_user(&db, "user-1", None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], alert);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn resolved_filter_and_counts() {
        let (db, _dir) = setup_db().await;
        insert_alert(&db, &make_alert("a1", false, "2026-01-01T00:00:01.000Z"))
            .await
            .unwrap();
        insert_alert(&db, &make_alert("a2", true, "2026-01-01T00:00:02.000Z"))
            .await
            .unwrap();
        insert_alert(&db, &make_alert("a3", false, "2026-01-01T00:00:03.000Z"))
            .await
            .unwrap();

        let unresolved = list_for_user(&db, "user-1", Some(false)).await.unwrap();
        assert_eq!(unresolved.len(), 2);
        // Newest first.
        assert_eq!(unresolved[0].id, "a3");

        let resolved = list_for_user(&db, "user-1", Some(true)).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "a2");

        assert_eq!(count_unresolved(&db, "user-1").await.unwrap(), 2);
        assert_eq!(count_for_user(&db, "user-1").await.unwrap(), 3);
        assert_eq!(count_for_user(&db, "other").await.unwrap(), 0);

        db.close().await.unwrap();
    }
}
