use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Response envelope ---

/// Every API response wraps its payload as `{"response": ..., "meta": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: Option<T>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Meta {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub errors: Vec<String>,
}

// --- Messages ---

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub source_guid: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Absent for attachment-only messages.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub favorited_by: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Attachment kinds the client understands. Anything else is kept verbatim
/// in [`Attachment::Unknown`] so it survives a round trip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Attachment {
    Known(KnownAttachment),
    Unknown(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KnownAttachment {
    Image {
        url: String,
    },
    Location {
        lat: String,
        lng: String,
        name: String,
    },
    Emoji {
        placeholder: String,
        charmap: Vec<Vec<i64>>,
    },
    Mentions {
        user_ids: Vec<String>,
        loci: Vec<Vec<i64>>,
    },
}

// --- Groups ---

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub creator_user_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub messages: GroupMessagesSummary,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct GroupMessagesSummary {
    #[serde(default)]
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Member {
    /// Membership id; distinct from `user_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub muted: bool,
}

// --- Outgoing payloads ---

#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    pub source_guid: String,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewDirectMessage<'a> {
    pub source_guid: String,
    pub recipient_id: &'a str,
    pub text: &'a str,
}
