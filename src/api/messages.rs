use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{ApiClient, IndexParams, MessageEndpoint};
use crate::error::{Error, Result};
use crate::models::{Message, NewDirectMessage, NewMessage};

/// Group messages: `/groups/:group_id/messages`.
#[derive(Debug, Clone)]
pub struct Messages {
    client: ApiClient,
}

impl Messages {
    /// Field of the index response that holds the message list.
    pub const MESSAGE_KEY: &'static str = "messages";

    pub fn new(client: ApiClient) -> Self {
        Messages { client }
    }
}

#[derive(Serialize)]
struct CreateMessageBody<'a> {
    message: NewMessage<'a>,
}

#[derive(Deserialize)]
struct CreatedMessage {
    message: Message,
}

impl MessageEndpoint for Messages {
    fn create(&self, id_key: &str, text: &str) -> Result<Message> {
        let body = CreateMessageBody {
            message: NewMessage {
                source_guid: Uuid::new_v4().to_string(),
                text,
            },
        };
        let created: Option<CreatedMessage> = self
            .client
            .post(&format!("groups/{id_key}/messages"), &body)?;
        created.map(|c| c.message).ok_or(Error::MissingResponse)
    }

    fn index(&self, id_key: &str, params: &IndexParams) -> Result<Value> {
        let page: Option<Value> = self
            .client
            .get(&format!("groups/{id_key}/messages"), &params.to_query())?;
        Ok(page.unwrap_or(Value::Null))
    }
}

/// Direct messages: `/direct_messages`, keyed by the other user's id.
#[derive(Debug, Clone)]
pub struct DirectMessages {
    client: ApiClient,
}

impl DirectMessages {
    pub const MESSAGE_KEY: &'static str = "direct_messages";

    pub fn new(client: ApiClient) -> Self {
        DirectMessages { client }
    }
}

#[derive(Serialize)]
struct CreateDirectMessageBody<'a> {
    direct_message: NewDirectMessage<'a>,
}

#[derive(Deserialize)]
struct CreatedDirectMessage {
    direct_message: Message,
}

impl MessageEndpoint for DirectMessages {
    fn create(&self, id_key: &str, text: &str) -> Result<Message> {
        let body = CreateDirectMessageBody {
            direct_message: NewDirectMessage {
                source_guid: Uuid::new_v4().to_string(),
                recipient_id: id_key,
                text,
            },
        };
        let created: Option<CreatedDirectMessage> = self.client.post("direct_messages", &body)?;
        created.map(|c| c.direct_message).ok_or(Error::MissingResponse)
    }

    fn index(&self, id_key: &str, params: &IndexParams) -> Result<Value> {
        let mut query = vec![("other_user_id", id_key.to_string())];
        query.extend(params.to_query().into_iter().filter(|(k, _)| *k != "after_id"));
        let page: Option<Value> = self.client.get("direct_messages", &query)?;
        Ok(page.unwrap_or(Value::Null))
    }

    /// The DM index only pages with `before_id` and `since_id`.
    fn supports_after(&self) -> bool {
        false
    }
}
