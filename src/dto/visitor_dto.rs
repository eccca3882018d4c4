use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::visitor::NamedCount;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackVisitRequest {
    #[validate(length(max = 2000))]
    pub referrer: Option<String>,
    #[validate(length(max = 2000))]
    pub page_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub total_visits: i64,
    pub unique_visitors: i64,
    pub today_visits: i64,
    pub devices: Vec<NamedCount>,
    pub browsers: Vec<NamedCount>,
    pub countries: Vec<NamedCount>,
}
