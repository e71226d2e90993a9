use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types that signal likely business conversion: a submitted contact
/// form, a KakaoTalk chat click, or a click-to-call.
pub const CONVERSION_INTENT_TYPES: [&str; 3] = ["form_submit", "kakao_click", "phone_click"];

/// Fixed stage order of the contact funnel. Stages are independent raw
/// counts, not a retained cohort; `form_open` happening without a later
/// `form_submit` still counts toward its own stage only.
pub const FUNNEL_STAGES: [&str; 4] = ["form_open", "form_submit", "kakao_click", "phone_click"];

/// Event type recorded when a visitor reads a blog post.
pub const BLOG_READ_TYPE: &str = "blog_read";

/// Canonical channel for rows with no recorded referrer type.
pub const DIRECT_CHANNEL: &str = "direct";

/// One page render, exactly as the ingestion layer wrote it.
///
/// Rows are immutable once written; the engine only ever reads them. All
/// nullable columns are `Option`; the reducers decide per field whether a
/// missing value maps to a placeholder category or is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageViewEvent {
    pub visitor_id: String,
    pub session_id: String,
    pub page_path: String,
    pub page_title: Option<String>,
    /// 'direct' | 'search' | 'social' | 'referral' | …; open set, NULL when
    /// the tracker could not classify the referrer.
    pub referrer_type: Option<String>,
    pub search_keyword: Option<String>,
    pub device_type: Option<String>,
    pub device_brand: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    /// e.g. "1920x1080"
    pub screen_resolution: Option<String>,
    /// Seconds spent on the page, >= 0.
    pub time_on_page: i64,
    /// 0–100.
    pub scroll_depth: i64,
    pub is_bounce: bool,
    pub created_at: DateTime<Utc>,
}

/// One visit, aggregating the page views of a single visitor.
///
/// Closed (finalized) by the ingestion layer when the visit ends; the engine
/// reads closed-or-in-progress rows as they exist at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorSession {
    pub visitor_id: String,
    pub is_bounce: bool,
    pub is_new_visitor: bool,
    /// Seconds.
    pub total_duration: i64,
    /// >= 1.
    pub page_count: i64,
    pub landing_page: String,
    pub exit_page: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub started_at: DateTime<Utc>,
}

/// A discrete visitor action with business meaning: 'form_open',
/// 'form_submit', 'kakao_click', 'phone_click', 'blog_read', …
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionEvent {
    pub session_id: String,
    pub event_type: String,
    pub event_label: Option<String>,
    pub page_path: String,
    pub referrer_type: Option<String>,
    pub device_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
