use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::youbora::variant::ResponseVariant;

/// Upsert payload for datasource connection settings.
///
/// The api key is accepted here and never echoed back by any read path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasourceSettingsUpsertRequest {
    #[validate(url)]
    pub service_root: Option<String>,
    #[validate(length(min = 1))]
    pub account: Option<String>,
    #[validate(length(min = 8))]
    pub api_key: Option<String>,
    pub response_variant: Option<ResponseVariant>,
}
