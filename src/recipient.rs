use tracing::{debug, info};

use crate::api::{ApiClient, DirectMessages, IndexParams, MessageEndpoint, Messages};
use crate::error::{Error, Result};
use crate::models::{Group, Member, Message};
use crate::pager::{MessagePager, PageDirection};

/// Longest text the API accepts in a single message, in characters.
///
/// Older clients split at 450 characters, so a 550-character post went out
/// as 450 + 100. This crate uses the full 500, giving 500 + 50.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Something messages can be sent to and listed from: a group, or the
/// direct-message conversation with one user.
#[derive(Debug, Clone)]
pub struct Recipient<E> {
    endpoint: E,
    message_key: String,
    id_key: String,
}

impl<E: MessageEndpoint> Recipient<E> {
    /// `message_key` names the field of an index response that holds the
    /// message list; `id_key` identifies this recipient to `endpoint`.
    pub fn new(
        endpoint: E,
        message_key: impl Into<String>,
        id_key: impl Into<String>,
    ) -> Result<Self> {
        let message_key = message_key.into();
        let id_key = id_key.into();
        if message_key.is_empty() {
            return Err(Error::EmptyIdentifier("message key"));
        }
        if id_key.is_empty() {
            return Err(Error::EmptyIdentifier("id key"));
        }
        Ok(Recipient {
            endpoint,
            message_key,
            id_key,
        })
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    /// Post `text`, split into as many messages as the length limit needs.
    /// Chunks are sent in order; the first failure stops the rest.
    pub fn post(&self, text: &str) -> Result<Vec<Message>> {
        if text.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let chunks = chunk_text(text, MAX_MESSAGE_LENGTH);
        info!(id_key = %self.id_key, chunks = chunks.len(), "posting message");

        chunks
            .into_iter()
            .map(|chunk| self.endpoint.create(&self.id_key, chunk))
            .collect()
    }

    /// [`Recipient::post`] for callers holding optional text. `None` is
    /// rejected the same way as an empty string.
    pub fn post_opt(&self, text: Option<&str>) -> Result<Vec<Message>> {
        self.post(text.ok_or(Error::EmptyMessage)?)
    }

    /// Fetch the first page of messages matching `query` and return a pager
    /// that lazily walks the rest.
    pub fn messages(&self, query: MessageQuery) -> Result<MessagePager<'_, E>> {
        let cursor = query.cursor()?;

        let mut params = IndexParams {
            limit: query.limit,
            ..IndexParams::default()
        };
        let direction = match cursor {
            None => PageDirection::Older,
            Some(Cursor::Before(id)) => {
                params.before_id = Some(id);
                PageDirection::Older
            }
            Some(Cursor::After(_)) if !self.endpoint.supports_after() => {
                return Err(Error::UnsupportedCursor("after"));
            }
            Some(Cursor::After(id)) => {
                params.after_id = Some(id);
                PageDirection::Newer
            }
            Some(Cursor::Since(id)) => {
                params.since_id = Some(id);
                PageDirection::Single
            }
        };

        debug!(id_key = %self.id_key, ?params, "listing messages");
        let raw = self.endpoint.index(&self.id_key, &params)?;
        MessagePager::new(
            &self.endpoint,
            &self.id_key,
            &self.message_key,
            direction,
            query.limit,
            raw,
        )
    }
}

impl Recipient<Messages> {
    pub fn for_group(client: &ApiClient, group: &Group) -> Result<Self> {
        Recipient::new(
            Messages::new(client.clone()),
            Messages::MESSAGE_KEY,
            group.id.as_str(),
        )
    }
}

impl Recipient<DirectMessages> {
    /// The direct-message conversation with `member`.
    pub fn for_member(client: &ApiClient, member: &Member) -> Result<Self> {
        Self::for_user(client, member.user_id.as_str())
    }

    pub fn for_user(client: &ApiClient, user_id: impl Into<String>) -> Result<Self> {
        Recipient::new(
            DirectMessages::new(client.clone()),
            DirectMessages::MESSAGE_KEY,
            user_id,
        )
    }
}

// --- Message listing query ---

/// Options for [`Recipient::messages`]. `after`, `before` and `since` are
/// mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageQuery {
    pub after: Option<String>,
    pub before: Option<String>,
    pub since: Option<String>,
    pub limit: Option<u32>,
}

impl MessageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages created after `id`, oldest first.
    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    /// Messages created before `id`, newest first.
    pub fn before(mut self, id: impl Into<String>) -> Self {
        self.before = Some(id.into());
        self
    }

    /// The most recent messages newer than `id`.
    pub fn since(mut self, id: impl Into<String>) -> Self {
        self.since = Some(id.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The single cursor this query selects, if any.
    pub fn cursor(&self) -> Result<Option<Cursor>> {
        let given = [&self.after, &self.before, &self.since]
            .iter()
            .filter(|c| c.is_some())
            .count();
        if given > 1 {
            return Err(Error::ConflictingCursors);
        }

        Ok(self
            .after
            .clone()
            .map(Cursor::After)
            .or_else(|| self.before.clone().map(Cursor::Before))
            .or_else(|| self.since.clone().map(Cursor::Since)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    After(String),
    Before(String),
    Since(String),
}

/// Split `text` into contiguous pieces of at most `max_chars` characters.
/// Never splits inside a character; the last piece may be shorter.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
