use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::repo_types::UserRecord;

/// Non-string JSON values are read as missing so the validator reports them.
fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Request body for create and update.
#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub message: &'static str,
    pub user: UserRecord,
    pub link: String,
}
