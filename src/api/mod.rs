// HTTP-facing collaborators. `client` owns the transport; the other modules
// are one endpoint type per API resource.

mod client;
mod groups;
mod messages;

pub use client::ApiClient;
pub use groups::Groups;
pub use messages::{DirectMessages, Messages};

use crate::error::Result;
use crate::models::Message;

/// Cursor parameters for a message index call. At most one of the `*_id`
/// fields is set by [`crate::Recipient::messages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexParams {
    pub after_id: Option<String>,
    pub since_id: Option<String>,
    pub before_id: Option<String>,
    pub limit: Option<u32>,
}

impl IndexParams {
    pub fn is_unbounded(&self) -> bool {
        self.after_id.is_none() && self.since_id.is_none() && self.before_id.is_none()
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.before_id {
            query.push(("before_id", id.clone()));
        }
        if let Some(id) = &self.since_id {
            query.push(("since_id", id.clone()));
        }
        if let Some(id) = &self.after_id {
            query.push(("after_id", id.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

/// The two calls a [`crate::Recipient`] needs from the network.
pub trait MessageEndpoint {
    /// Send one message of `text` to the target identified by `id_key`.
    fn create(&self, id_key: &str, text: &str) -> Result<Message>;

    /// Fetch one page of messages for `id_key`. Returns the raw `response`
    /// object; `Value::Null` when there is nothing to return.
    fn index(&self, id_key: &str, params: &IndexParams) -> Result<serde_json::Value>;

    /// Whether `index` honours `after_id`.
    fn supports_after(&self) -> bool {
        true
    }
}

impl<E: MessageEndpoint + ?Sized> MessageEndpoint for &E {
    fn create(&self, id_key: &str, text: &str) -> Result<Message> {
        (**self).create(id_key, text)
    }

    fn index(&self, id_key: &str, params: &IndexParams) -> Result<serde_json::Value> {
        (**self).index(id_key, params)
    }

    fn supports_after(&self) -> bool {
        (**self).supports_after()
    }
}
