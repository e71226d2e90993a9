//! Traffic overview: totals, rates, daily series, hourly heatmap.

use std::collections::BTreeSet;

use chrono_tz::Tz;
use serde::Serialize;

use crate::event::{ConversionEvent, PageViewEvent, VisitorSession};
use crate::timeframe::{local_date, local_hour, seed_daily_series, TimeRange};

use super::{avg_round, pct, round1};

#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub total_views: i64,
    pub unique_visitors: i64,
    pub total_sessions: i64,
    /// Integer percentage of sessions that bounced.
    pub bounce_rate: i64,
    pub new_visitors: i64,
    /// Mean session duration, whole seconds.
    pub avg_duration: i64,
    /// Mean pages per session, one decimal.
    pub avg_pages: f64,
    /// Conversion events in the window, all types.
    pub total_events: i64,
    /// One entry per calendar day in the window, zero-filled.
    pub daily_chart: Vec<DailyPoint>,
    /// Page views by local hour-of-day, accumulated across the whole window.
    pub hourly_heatmap: [i64; 24],
}

pub fn reduce_overview(
    views: &[PageViewEvent],
    sessions: &[VisitorSession],
    events: &[ConversionEvent],
    range: &TimeRange,
    days: i64,
    tz: Tz,
) -> OverviewResponse {
    let total_sessions = sessions.len() as i64;
    let bounced = sessions.iter().filter(|s| s.is_bounce).count() as i64;
    let new_visitors = sessions.iter().filter(|s| s.is_new_visitor).count() as i64;
    let unique_visitors = sessions
        .iter()
        .map(|s| s.visitor_id.as_str())
        .collect::<BTreeSet<_>>()
        .len() as i64;

    let duration_sum: i64 = sessions.iter().map(|s| s.total_duration).sum();
    let page_sum: i64 = sessions.iter().map(|s| s.page_count).sum();
    let avg_pages = if total_sessions == 0 {
        0.0
    } else {
        round1(page_sum as f64 / total_sessions as f64)
    };

    let mut daily = seed_daily_series(range.until, days, tz);
    let mut hourly_heatmap = [0i64; 24];
    for view in views {
        // Only days in the seeded set are charted; a view on the fractional
        // first calendar day of the window still counts toward the totals.
        if let Some(slot) = daily.get_mut(&local_date(view.created_at, tz)) {
            *slot += 1;
        }
        hourly_heatmap[local_hour(view.created_at, tz) % 24] += 1;
    }
    let daily_chart = daily
        .into_iter()
        .map(|(date, views)| DailyPoint {
            date: date.format("%Y-%m-%d").to_string(),
            views,
        })
        .collect();

    OverviewResponse {
        total_views: views.len() as i64,
        unique_visitors,
        total_sessions,
        bounce_rate: pct(bounced, total_sessions),
        new_visitors,
        avg_duration: avg_round(duration_sum, total_sessions),
        avg_pages,
        total_events: events.len() as i64,
        daily_chart,
        hourly_heatmap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    const TZ: Tz = chrono_tz::Asia::Seoul;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 6, 0, 0).single().unwrap()
    }

    fn view_at(ts: DateTime<Utc>) -> PageViewEvent {
        PageViewEvent {
            visitor_id: "v1".into(),
            session_id: "s1".into(),
            page_path: "/".into(),
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
            created_at: ts,
        }
    }

    fn session(visitor_id: &str, is_bounce: bool, is_new: bool) -> VisitorSession {
        VisitorSession {
            visitor_id: visitor_id.into(),
            is_bounce,
            is_new_visitor: is_new,
            total_duration: 120,
            page_count: 3,
            landing_page: "/".into(),
            exit_page: None,
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            started_at: now() - Duration::hours(1),
        }
    }

    #[test]
    fn bounce_rate_and_unique_visitors() {
        let range = TimeRange::last_days_from(now(), 30);
        let views: Vec<_> = (0..10).map(|i| view_at(now() - Duration::minutes(i))).collect();
        let sessions = vec![
            session("a", true, true),
            session("a", false, false),
            session("b", true, false),
            session("b", false, false),
            session("c", false, false),
        ];
        let out = reduce_overview(&views, &sessions, &[], &range, 30, TZ);
        assert_eq!(out.total_views, 10);
        assert_eq!(out.total_sessions, 5);
        assert_eq!(out.bounce_rate, 40);
        assert_eq!(out.unique_visitors, 3);
        assert_eq!(out.new_visitors, 1);
        assert_eq!(out.avg_duration, 120);
        assert_eq!(out.avg_pages, 3.0);
    }

    #[test]
    fn empty_window_is_all_zeros_not_nan() {
        let range = TimeRange::last_days_from(now(), 7);
        let out = reduce_overview(&[], &[], &[], &range, 7, TZ);
        assert_eq!(out.bounce_rate, 0);
        assert_eq!(out.avg_duration, 0);
        assert_eq!(out.avg_pages, 0.0);
        assert_eq!(out.hourly_heatmap, [0i64; 24]);
        assert_eq!(out.daily_chart.len(), 7);
        assert!(out.daily_chart.iter().all(|p| p.views == 0));
    }

    #[test]
    fn daily_chart_has_exactly_d_increasing_dates() {
        let range = TimeRange::last_days_from(now(), 14);
        let views = vec![view_at(now() - Duration::hours(2))];
        let out = reduce_overview(&views, &[], &[], &range, 14, TZ);
        assert_eq!(out.daily_chart.len(), 14);
        let dates: Vec<&str> = out.daily_chart.iter().map(|p| p.date.as_str()).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        // 06:00 UTC on Mar 10 is 15:00 in Seoul; last bucket is Mar 10.
        assert_eq!(dates[13], "2026-03-10");
        assert_eq!(out.daily_chart[13].views, 1);
    }

    #[test]
    fn heatmap_buckets_by_local_hour() {
        let range = TimeRange::last_days_from(now(), 30);
        // 06:00 UTC = 15:00 Seoul.
        let views = vec![view_at(now()), view_at(now()), view_at(now() - Duration::hours(1))];
        let out = reduce_overview(&views, &[], &[], &range, 30, TZ);
        assert_eq!(out.hourly_heatmap[15], 2);
        assert_eq!(out.hourly_heatmap[14], 1);
        assert_eq!(out.hourly_heatmap.iter().sum::<i64>(), 3);
    }

    #[test]
    fn total_events_counts_all_conversion_events() {
        let range = TimeRange::last_days_from(now(), 30);
        let events = vec![ConversionEvent {
            session_id: "s1".into(),
            event_type: "form_open".into(),
            event_label: None,
            page_path: "/contact".into(),
            referrer_type: None,
            device_type: None,
            created_at: now() - Duration::hours(3),
        }];
        let out = reduce_overview(&[], &[], &events, &range, 30, TZ);
        assert_eq!(out.total_events, 1);
    }
}
