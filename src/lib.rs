//! Blocking client for the GroupMe API.
//!
//! A [`Recipient`] is anything messages can be posted to and listed from: a
//! group or a direct-message conversation. It wraps a [`api::MessageEndpoint`]
//! that does the actual HTTP calls.
//!
//! ```no_run
//! use groupme_client::{ApiClient, MessageQuery, Recipient, api::Groups};
//!
//! # fn main() -> groupme_client::Result<()> {
//! let client = ApiClient::from_env()?;
//! let group = Groups::new(client.clone()).show("1234567")?;
//! let recipient = Recipient::for_group(&client, &group)?;
//!
//! recipient.post("hello")?;
//! for message in recipient.messages(MessageQuery::new().limit(50))?.take(100) {
//!     let message = message?;
//!     println!("{}: {}", message.name, message.text_or_empty());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pager;
pub mod recipient;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pager::{MessagePager, PageDirection};
pub use recipient::{Cursor, MAX_MESSAGE_LENGTH, MessageQuery, Recipient, chunk_text};
