//! Page engagement: per-path stats plus landing/exit rankings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{PageViewEvent, VisitorSession};

use super::{avg_round, count_keys, pct, PathCount};

const ENTRY_EXIT_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStat {
    pub path: String,
    pub title: String,
    pub views: i64,
    /// Mean time-on-page, whole seconds.
    pub avg_time: i64,
    /// Mean scroll depth, 0–100.
    pub avg_scroll: i64,
    pub bounce_rate: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesResponse {
    pub popular_pages: Vec<PageStat>,
    pub landing_pages: Vec<PathCount>,
    pub exit_pages: Vec<PathCount>,
}

#[derive(Default)]
struct PageAcc {
    views: i64,
    title: Option<String>,
    time_sum: i64,
    scroll_sum: i64,
    bounces: i64,
}

pub fn reduce_pages(views: &[PageViewEvent], sessions: &[VisitorSession]) -> PagesResponse {
    let mut pages: BTreeMap<&str, PageAcc> = BTreeMap::new();
    for view in views {
        let acc = pages.entry(view.page_path.as_str()).or_default();
        acc.views += 1;
        acc.time_sum += view.time_on_page;
        acc.scroll_sum += view.scroll_depth;
        if view.is_bounce {
            acc.bounces += 1;
        }
        // Rows arrive in ascending created_at order, so this is the first
        // non-empty title ever seen for the path.
        if acc.title.is_none() {
            if let Some(title) = view.page_title.as_deref().filter(|t| !t.is_empty()) {
                acc.title = Some(title.to_string());
            }
        }
    }

    let mut popular_pages: Vec<PageStat> = pages
        .into_iter()
        .map(|(path, acc)| PageStat {
            title: acc.title.unwrap_or_else(|| path.to_string()),
            path: path.to_string(),
            views: acc.views,
            avg_time: avg_round(acc.time_sum, acc.views),
            avg_scroll: avg_round(acc.scroll_sum, acc.views),
            bounce_rate: pct(acc.bounces, acc.views),
        })
        .collect();
    popular_pages.sort_by(|a, b| b.views.cmp(&a.views));

    let mut landing_pages: Vec<PathCount> =
        count_keys(sessions.iter().map(|s| s.landing_page.as_str()))
            .into_iter()
            .map(|(path, count)| PathCount { path, count })
            .collect();
    landing_pages.sort_by(|a, b| b.count.cmp(&a.count));
    landing_pages.truncate(ENTRY_EXIT_LIMIT);

    let mut exit_pages: Vec<PathCount> = count_keys(
        sessions
            .iter()
            .filter_map(|s| s.exit_page.as_deref())
            .filter(|p| !p.is_empty()),
    )
    .into_iter()
    .map(|(path, count)| PathCount { path, count })
    .collect();
    exit_pages.sort_by(|a, b| b.count.cmp(&a.count));
    exit_pages.truncate(ENTRY_EXIT_LIMIT);

    PagesResponse {
        popular_pages,
        landing_pages,
        exit_pages,
    }
}
