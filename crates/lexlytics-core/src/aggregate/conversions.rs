//! Conversion funnel, event mix, channel performance.
//!
//! The "blog contribution" figure is deliberately an approximation: it
//! counts distinct blog paths read anywhere in the window, not same-session
//! attribution to a later conversion. The intended semantics upstream are
//! ambiguous, so the proxy is surfaced as-is rather than silently redefined.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::event::{ConversionEvent, VisitorSession, BLOG_READ_TYPE, CONVERSION_INTENT_TYPES, DIRECT_CHANNEL, FUNNEL_STAGES};

use super::{count_keys, pct, pct1, PathCount};

const PATH_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub event_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelPerformance {
    pub channel: String,
    /// All conversion events observed on this channel.
    pub sessions: i64,
    /// The conversion-intent subset of those events.
    pub conversions: i64,
    /// Integer percentage, conversions / sessions.
    pub rate: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionsResponse {
    pub funnel: Vec<TypeCount>,
    pub event_counts: Vec<TypeCount>,
    pub conversion_paths: Vec<PathCount>,
    pub channel_performance: Vec<ChannelPerformance>,
    pub blog_contribution: i64,
    pub overall_conversion_rate: f64,
    pub total_sessions: i64,
}

fn is_intent(event_type: &str) -> bool {
    CONVERSION_INTENT_TYPES.contains(&event_type)
}

pub fn reduce_conversions(
    events: &[ConversionEvent],
    sessions: &[VisitorSession],
) -> ConversionsResponse {
    let type_counts = count_keys(events.iter().map(|e| e.event_type.as_str()));

    // Fixed four-stage funnel: raw counts in literal stage order, zero when
    // a stage never fired.
    let funnel = FUNNEL_STAGES
        .iter()
        .map(|stage| TypeCount {
            event_type: (*stage).to_string(),
            count: type_counts.get(*stage).copied().unwrap_or(0),
        })
        .collect();

    let mut event_counts: Vec<TypeCount> = type_counts
        .into_iter()
        .map(|(event_type, count)| TypeCount { event_type, count })
        .collect();
    event_counts.sort_by(|a, b| b.count.cmp(&a.count));

    // Pages on which a conversion-intent event fired.
    let path_counts = count_keys(
        events
            .iter()
            .filter(|e| is_intent(&e.event_type))
            .map(|e| e.page_path.as_str()),
    );
    let mut conversion_paths: Vec<PathCount> = path_counts
        .into_iter()
        .map(|(path, count)| PathCount { path, count })
        .collect();
    conversion_paths.sort_by(|a, b| b.count.cmp(&a.count));
    conversion_paths.truncate(PATH_LIMIT);

    // Per-channel rate over the conversion-event stream itself.
    let mut per_channel: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for event in events {
        let channel = event
            .referrer_type
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DIRECT_CHANNEL);
        let entry = per_channel.entry(channel).or_insert((0, 0));
        entry.0 += 1;
        if is_intent(&event.event_type) {
            entry.1 += 1;
        }
    }
    let mut channel_performance: Vec<ChannelPerformance> = per_channel
        .into_iter()
        .map(|(channel, (total, intents))| ChannelPerformance {
            channel: channel.to_string(),
            sessions: total,
            conversions: intents,
            rate: pct(intents, total),
        })
        .collect();
    channel_performance.sort_by(|a, b| b.conversions.cmp(&a.conversions));

    let blog_contribution = events
        .iter()
        .filter(|e| e.event_type == BLOG_READ_TYPE)
        .map(|e| e.page_path.as_str())
        .collect::<BTreeSet<_>>()
        .len() as i64;

    let intent_total = events.iter().filter(|e| is_intent(&e.event_type)).count() as i64;
    let total_sessions = sessions.len() as i64;

    ConversionsResponse {
        funnel,
        event_counts,
        conversion_paths,
        channel_performance,
        blog_contribution,
        overall_conversion_rate: pct1(intent_total, total_sessions),
        total_sessions,
    }
}
