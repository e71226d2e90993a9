//! "Who is on the site right now": short rolling windows over live rows.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::{ConversionEvent, PageViewEvent};
use crate::timeframe::TimeRange;

use super::{count_keys, PathCount};

/// Window for "active right now".
pub const ACTIVE_WINDOW_MINUTES: i64 = 5;
/// Window for the recent-activity feeds.
pub const RECENT_WINDOW_MINUTES: i64 = 30;

const FEED_LIMIT: usize = 50;
const TOP_PAGES_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub label: Option<String>,
    pub page_path: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveView {
    pub page_path: String,
    pub page_title: Option<String>,
    pub referrer_type: Option<String>,
    pub device_type: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeResponse {
    /// Distinct visitors with a page view in the last 5 minutes.
    pub active_visitors: i64,
    pub top_pages: Vec<PathCount>,
    pub recent_events: Vec<RecentEvent>,
    pub live_feed: Vec<LiveView>,
}

/// Reduce the 30-minute row sets. `views` and `events` arrive in ascending
/// `created_at` order; the 5-minute active subset is derived here rather
/// than fetched separately.
pub fn reduce_realtime(
    views: &[PageViewEvent],
    events: &[ConversionEvent],
    now: DateTime<Utc>,
) -> RealtimeResponse {
    let active = TimeRange::last_minutes_from(now, ACTIVE_WINDOW_MINUTES);
    let active_views: Vec<&PageViewEvent> = views
        .iter()
        .filter(|v| active.since <= v.created_at)
        .collect();

    let active_visitors = active_views
        .iter()
        .map(|v| v.visitor_id.as_str())
        .collect::<BTreeSet<_>>()
        .len() as i64;

    let mut top_pages: Vec<PathCount> =
        count_keys(active_views.iter().map(|v| v.page_path.as_str()))
            .into_iter()
            .map(|(path, count)| PathCount { path, count })
            .collect();
    top_pages.sort_by(|a, b| b.count.cmp(&a.count));
    top_pages.truncate(TOP_PAGES_LIMIT);

    let recent_events = events
        .iter()
        .rev()
        .take(FEED_LIMIT)
        .map(|e| RecentEvent {
            event_type: e.event_type.clone(),
            label: e.event_label.clone(),
            page_path: e.page_path.clone(),
            created_at: e.created_at.to_rfc3339(),
        })
        .collect();

    let live_feed = views
        .iter()
        .rev()
        .take(FEED_LIMIT)
        .map(|v| LiveView {
            page_path: v.page_path.clone(),
            page_title: v.page_title.clone(),
            referrer_type: v.referrer_type.clone(),
            device_type: v.device_type.clone(),
            created_at: v.created_at.to_rfc3339(),
        })
        .collect();

    RealtimeResponse {
        active_visitors,
        top_pages,
        recent_events,
        live_feed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).single().unwrap()
    }

    fn view(visitor: &str, path: &str, age_minutes: i64) -> PageViewEvent {
        PageViewEvent {
            visitor_id: visitor.into(),
            session_id: "s".into(),
            page_path: path.into(),
            page_title: None,
            referrer_type: None,
            search_keyword: None,
            device_type: None,
            device_brand: None,
            browser: None,
            os: None,
            screen_resolution: None,
            time_on_page: 0,
            scroll_depth: 0,
            is_bounce: false,
            created_at: now() - Duration::minutes(age_minutes),
        }
    }

    fn conversion(age_minutes: i64) -> ConversionEvent {
        ConversionEvent {
            session_id: "s".into(),
            event_type: "form_submit".into(),
            event_label: Some("상담 신청".into()),
            page_path: "/contact".into(),
            referrer_type: None,
            device_type: None,
            created_at: now() - Duration::minutes(age_minutes),
        }
    }

    #[test]
    fn only_five_minute_views_count_as_active() {
        // A: 2 views in the last 5 minutes. B: one view 10 minutes ago.
        let views = vec![view("b", "/", 10), view("a", "/fees", 3), view("a", "/", 1)];
        let out = reduce_realtime(&views, &[], now());
        assert_eq!(out.active_visitors, 1);
        // B's view is outside the active window but still in the live feed.
        assert_eq!(out.live_feed.len(), 3);
    }

    #[test]
    fn top_pages_rank_the_active_window_only() {
        let views = vec![
            view("a", "/old", 20),
            view("a", "/fees", 4),
            view("b", "/fees", 2),
            view("c", "/", 1),
        ];
        let out = reduce_realtime(&views, &[], now());
        assert_eq!(out.top_pages[0].path, "/fees");
        assert_eq!(out.top_pages[0].count, 2);
        assert!(!out.top_pages.iter().any(|p| p.path == "/old"));
    }

    #[test]
    fn feeds_are_newest_first_and_capped_at_fifty() {
        let views: Vec<_> = (0..60).map(|i| view("a", "/", 59 - i)).collect();
        let events: Vec<_> = (0..60).map(|i| conversion(59 - i)).collect();
        let out = reduce_realtime(&views, &events, now());
        assert_eq!(out.live_feed.len(), 50);
        assert_eq!(out.recent_events.len(), 50);
        // Input is ascending, output newest first.
        assert!(out.live_feed[0].created_at > out.live_feed[1].created_at);
        assert!(out.recent_events[0].created_at > out.recent_events[1].created_at);
    }

    #[test]
    fn empty_windows_produce_zeroes_not_errors() {
        let out = reduce_realtime(&[], &[], now());
        assert_eq!(out.active_visitors, 0);
        assert!(out.top_pages.is_empty());
        assert!(out.recent_events.is_empty());
        assert!(out.live_feed.is_empty());
    }
}
