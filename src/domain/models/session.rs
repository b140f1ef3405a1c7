use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Read-only summary of a conversation persisted by the backend. The client
/// never mutates these, it only replaces its cached copy on refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}
