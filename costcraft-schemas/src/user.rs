use serde::{Deserialize, Serialize};

/// A registered-user record. Appended at registration time; never read back
/// for authentication — login only stores a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    pub created_at: String,
}
