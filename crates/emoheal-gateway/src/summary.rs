// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood summary aggregation over a window of exchange records.

use std::collections::BTreeMap;

use serde::Serialize;

use emoheal_core::ExchangeRecord;

/// One emotion with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: i64,
}

/// Per-day sentiment aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    pub average: f64,
    pub count: i64,
}

/// Aggregated mood summary for one user window.
#[derive(Debug, Clone, Serialize)]
pub struct MoodSummary {
    /// Occurrences per emotion category across the window.
    pub emotion_distribution: BTreeMap<String, i64>,
    /// The five most frequent emotions, count descending.
    pub top_emotions: Vec<EmotionCount>,
    /// Mean compound score over all records, rounded to 3 decimals.
    /// Records without sentiment (crisis, degraded turns) contribute 0.
    pub average_sentiment: f64,
    /// Per-day sentiment trend keyed by `YYYY-MM-DD`, sorted.
    pub sentiment_trend: BTreeMap<String, DailySentiment>,
}

/// Aggregates a window of exchange records into a mood summary.
pub fn aggregate(records: &[ExchangeRecord]) -> MoodSummary {
    let mut emotion_distribution: BTreeMap<String, i64> = BTreeMap::new();
    let mut compounds: Vec<f64> = Vec::with_capacity(records.len());
    let mut daily: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for record in records {
        for emotion in &record.emotions {
            *emotion_distribution.entry(emotion.clone()).or_insert(0) += 1;
        }

        let compound = record.sentiment.map(|s| s.compound).unwrap_or(0.0);
        compounds.push(compound);

        // created_at is RFC 3339; the first 10 chars are the date.
        let day = record
            .created_at
            .get(..10)
            .unwrap_or(record.created_at.as_str())
            .to_string();
        daily.entry(day).or_default().push(compound);
    }

    let average_sentiment = if compounds.is_empty() {
        0.0
    } else {
        round3(compounds.iter().sum::<f64>() / compounds.len() as f64)
    };

    let mut top_emotions: Vec<EmotionCount> = emotion_distribution
        .iter()
        .map(|(emotion, count)| EmotionCount {
            emotion: emotion.clone(),
            count: *count,
        })
        .collect();
    // Count descending; emotion name breaks ties deterministically.
    top_emotions.sort_by(|a, b| b.count.cmp(&a.count).then(a.emotion.cmp(&b.emotion)));
    top_emotions.truncate(5);

    let sentiment_trend = daily
        .into_iter()
        .map(|(day, scores)| {
            let count = scores.len() as i64;
            let average = round3(scores.iter().sum::<f64>() / scores.len() as f64);
            (day, DailySentiment { average, count })
        })
        .collect();

    MoodSummary {
        emotion_distribution,
        top_emotions,
        average_sentiment,
        sentiment_trend,
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
