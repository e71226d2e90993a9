//! Channel attribution: referrer mix, search keywords, UTM campaigns.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{PageViewEvent, VisitorSession, DIRECT_CHANNEL};

use super::count_keys;

const KEYWORD_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct ChannelSlice {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignCount {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsResponse {
    pub channels: Vec<ChannelSlice>,
    pub top_keywords: Vec<KeywordCount>,
    pub campaigns: Vec<CampaignCount>,
}

pub fn reduce_channels(views: &[PageViewEvent], sessions: &[VisitorSession]) -> ChannelsResponse {
    // Referrer mix. Rows without a referrer type are attributed to 'direct'
    // so every view lands in some channel.
    let referrer_counts = count_keys(views.iter().map(|v| {
        v.referrer_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DIRECT_CHANNEL)
    }));
    let mut channels: Vec<ChannelSlice> = referrer_counts
        .into_iter()
        .map(|(name, value)| ChannelSlice { name, value })
        .collect();
    channels.sort_by(|a, b| b.value.cmp(&a.value));

    // Exact-string keyword ranking over views that carried one.
    let keyword_counts = count_keys(
        views
            .iter()
            .filter_map(|v| v.search_keyword.as_deref())
            .filter(|k| !k.is_empty()),
    );
    let mut top_keywords: Vec<KeywordCount> = keyword_counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();
    top_keywords.sort_by(|a, b| b.count.cmp(&a.count));
    top_keywords.truncate(KEYWORD_LIMIT);

    // Campaign grouping over sessions that arrived via a tagged link.
    // Medium and campaign default to "" so a source-only link still groups.
    let mut campaign_counts: BTreeMap<(String, String, String), i64> = BTreeMap::new();
    for session in sessions {
        let Some(source) = session.utm_source.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };
        let key = (
            source.to_string(),
            session.utm_medium.clone().unwrap_or_default(),
            session.utm_campaign.clone().unwrap_or_default(),
        );
        *campaign_counts.entry(key).or_insert(0) += 1;
    }
    let mut campaigns: Vec<CampaignCount> = campaign_counts
        .into_iter()
        .map(|((source, medium, campaign), count)| CampaignCount {
            source,
            medium,
            campaign,
            count,
        })
        .collect();
    campaigns.sort_by(|a, b| b.count.cmp(&a.count));

    ChannelsResponse {
        channels,
        top_keywords,
        campaigns,
    }
}
