//! Numeric `errorCode` values returned by PlayFab that callers commonly match on.
//!
//! Compare against [`crate::PlayFabError::service_code`].

pub const ENCRYPTION_KEY_MISSING: i32 = 1290;
pub const EVALUATION_MODE_PLAYER_COUNT_EXCEEDED: i32 = 1490;
pub const EXPIRED_XBOX_LIVE_TOKEN: i32 = 1189;
pub const INVALID_XBOX_LIVE_TOKEN: i32 = 1188;
pub const REQUEST_VIEW_CONSTRAINT_PARAMS_NOT_ALLOWED: i32 = 1303;
pub const SIGNED_REQUEST_NOT_ALLOWED: i32 = 1302;
pub const XBOX_INACCESSIBLE: i32 = 1339;
pub const XBOX_REJECTED_XSTS_EXCHANGE_REQUEST: i32 = 1343;
pub const XBOX_XASS_EXCHANGE_FAILURE: i32 = 1306;

pub const DATABASE_THROUGHPUT_EXCEEDED: i32 = 1113;
pub const ITEM_NOT_FOUND: i32 = 1047;
pub const NOT_IMPLEMENTED: i32 = 1515;
