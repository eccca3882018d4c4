use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct QueryRequest {
    #[validate(custom = "validate_not_blank")]
    pub query: String,
}
