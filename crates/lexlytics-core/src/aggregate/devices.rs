//! Device profile: categorical frequency counts, one field at a time.

use serde::Serialize;

use crate::event::PageViewEvent;

use super::{count_keys, into_desc_counts, NamedCount};

const RESOLUTION_LIMIT: usize = 15;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesResponse {
    pub device_types: Vec<NamedCount>,
    pub brands: Vec<NamedCount>,
    pub browsers: Vec<NamedCount>,
    pub operating_systems: Vec<NamedCount>,
    pub resolutions: Vec<NamedCount>,
}

/// Count distinct non-empty values of one field, descending.
fn field_counts<F>(views: &[PageViewEvent], field: F) -> Vec<NamedCount>
where
    F: Fn(&PageViewEvent) -> Option<&str>,
{
    into_desc_counts(count_keys(
        views
            .iter()
            .filter_map(|v| field(v))
            .filter(|value| !value.is_empty()),
    ))
}

pub fn reduce_devices(views: &[PageViewEvent]) -> DevicesResponse {
    let mut resolutions = field_counts(views, |v| v.screen_resolution.as_deref());
    resolutions.truncate(RESOLUTION_LIMIT);

    DevicesResponse {
        device_types: field_counts(views, |v| v.device_type.as_deref()),
        brands: field_counts(views, |v| v.device_brand.as_deref()),
        browsers: field_counts(views, |v| v.browser.as_deref()),
        operating_systems: field_counts(views, |v| v.os.as_deref()),
        resolutions,
    }
}
