use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{IndexParams, MessageEndpoint};
use crate::error::Result;
use crate::models::Message;

/// Which way a pager moves once its current page is used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// Follow `before_id` from the last message of each page.
    Older,
    /// Follow `after_id` from the last message of each page.
    Newer,
    /// Only the first page. `since_id` queries have no continuation.
    Single,
}

/// Lazy iterator over a recipient's messages, one index call per page.
///
/// After an error is yielded the pager is finished. A page that does not
/// move past the previous cursor also ends iteration.
pub struct MessagePager<'a, E> {
    endpoint: &'a E,
    id_key: &'a str,
    message_key: &'a str,
    direction: PageDirection,
    limit: Option<u32>,
    page: Vec<Message>,
    pending: VecDeque<Message>,
    done: bool,
}

impl<'a, E: MessageEndpoint> MessagePager<'a, E> {
    /// Wrap the `raw` result of a first index call.
    pub fn new(
        endpoint: &'a E,
        id_key: &'a str,
        message_key: &'a str,
        direction: PageDirection,
        limit: Option<u32>,
        raw: Value,
    ) -> Result<Self> {
        let page = parse_page(raw, message_key)?;
        Ok(MessagePager {
            endpoint,
            id_key,
            message_key,
            direction,
            limit,
            done: page.is_empty(),
            pending: page.iter().cloned().collect(),
            page,
        })
    }

    pub fn direction(&self) -> PageDirection {
        self.direction
    }

    /// The most recently fetched page.
    pub fn page(&self) -> &[Message] {
        &self.page
    }

    /// The most recently fetched page, without any further requests.
    pub fn into_page(self) -> Vec<Message> {
        self.page
    }

    /// Fetch the page after the current one. Returns `false` once there is
    /// nothing more to fetch.
    pub fn fetch_next(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        let Some(last) = self.page.last() else {
            self.done = true;
            return Ok(false);
        };

        let cursor = last.id.clone();
        let mut params = IndexParams {
            limit: self.limit,
            ..IndexParams::default()
        };
        match self.direction {
            PageDirection::Older => params.before_id = Some(cursor.clone()),
            PageDirection::Newer => params.after_id = Some(cursor.clone()),
            PageDirection::Single => {
                self.done = true;
                return Ok(false);
            }
        }

        debug!(id_key = self.id_key, ?params, "fetching next page");
        let raw = self.endpoint.index(self.id_key, &params)?;
        let page = parse_page(raw, self.message_key)?;
        if page.is_empty() {
            self.done = true;
            self.page.clear();
            return Ok(false);
        }
        // A server that ignores the cursor hands back the same page again.
        let stalled = page.last().is_some_and(|m| m.id == cursor)
            || page.iter().map(|m| &m.id).eq(self.page.iter().map(|m| &m.id));
        if stalled {
            warn!(id_key = self.id_key, cursor = %cursor, "page did not advance, stopping");
            self.done = true;
            return Ok(false);
        }
        self.pending.extend(page.iter().cloned());
        self.page = page;
        Ok(true)
    }
}

impl<E: MessageEndpoint> Iterator for MessagePager<'_, E> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Some(Ok(message));
            }
            match self.fetch_next() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Pull the message list out of a raw index response. `Null` and a missing
/// key both mean an empty page.
fn parse_page(raw: Value, message_key: &str) -> Result<Vec<Message>> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Object(mut fields) => match fields.remove(message_key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(list) => Ok(serde_json::from_value(list)?),
        },
        other => Ok(serde_json::from_value(other)?),
    }
}
