use std::cell::RefCell;
use std::collections::VecDeque;

use groupme_client::api::{IndexParams, MessageEndpoint};
use groupme_client::models::Message;
use groupme_client::{Error, Result};
use serde_json::{Value, json};

/// One call made against a [`RecordingEndpoint`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { id_key: String, text: String },
    Index { id_key: String, params: IndexParams },
}

/// In-memory stand-in for an HTTP endpoint. Records every call and answers
/// index calls from a queue of canned pages (`Value::Null` once it runs dry).
#[derive(Debug, Default)]
pub struct RecordingEndpoint {
    calls: RefCell<Vec<Call>>,
    pages: RefCell<VecDeque<Result<Value>>>,
    fail_create_at: Option<usize>,
}

impl RecordingEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: Vec<Value>) -> Self {
        RecordingEndpoint {
            pages: RefCell::new(pages.into_iter().map(Ok).collect()),
            ..Self::default()
        }
    }

    /// Queue an index response that fails.
    pub fn push_error(&self, error: Error) {
        self.pages.borrow_mut().push_back(Err(error));
    }

    /// Make the `n`th create call (0-based) fail.
    pub fn failing_create_at(n: usize) -> Self {
        RecordingEndpoint {
            fail_create_at: Some(n),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn creates(&self) -> Vec<(String, String)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Create { id_key, text } => Some((id_key.clone(), text.clone())),
                Call::Index { .. } => None,
            })
            .collect()
    }

    pub fn indexes(&self) -> Vec<(String, IndexParams)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Index { id_key, params } => Some((id_key.clone(), params.clone())),
                Call::Create { .. } => None,
            })
            .collect()
    }
}

impl MessageEndpoint for RecordingEndpoint {
    fn create(&self, id_key: &str, text: &str) -> Result<Message> {
        let n = self.creates().len();
        self.calls.borrow_mut().push(Call::Create {
            id_key: id_key.to_string(),
            text: text.to_string(),
        });
        if self.fail_create_at == Some(n) {
            return Err(Error::Api {
                status: 500,
                errors: vec!["boom".to_string()],
            });
        }
        Ok(message(&format!("m{n}"), text))
    }

    fn index(&self, id_key: &str, params: &IndexParams) -> Result<Value> {
        self.calls.borrow_mut().push(Call::Index {
            id_key: id_key.to_string(),
            params: params.clone(),
        });
        self.pages.borrow_mut().pop_front().unwrap_or(Ok(Value::Null))
    }
}

/// A message object as the API returns it.
pub fn message_json(id: &str, text: &str) -> Value {
    json!({
        "id": id,
        "source_guid": format!("guid-{id}"),
        "created_at": 1_700_000_000,
        "user_id": "u1",
        "group_id": "g1",
        "name": "Tester",
        "avatar_url": null,
        "text": text,
        "system": false,
        "favorited_by": [],
        "attachments": []
    })
}

pub fn message(id: &str, text: &str) -> Message {
    serde_json::from_value(message_json(id, text)).unwrap()
}

/// An index `response` object holding messages with the given ids under `key`.
pub fn page(key: &str, ids: &[&str]) -> Value {
    let messages: Vec<Value> = ids
        .iter()
        .map(|id| message_json(id, &format!("message {id}")))
        .collect();
    let mut response = serde_json::Map::new();
    response.insert("count".to_string(), json!(100));
    response.insert(key.to_string(), Value::Array(messages));
    Value::Object(response)
}

pub fn ids(messages: &[Message]) -> Vec<String> {
    messages.iter().map(|m| m.id.clone()).collect()
}
