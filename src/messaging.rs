//! Posting worklog messages to the team activity feed.

use std::cell::RefCell;
use std::time::Duration;

use log::debug;
use serde::Serialize;

use crate::error::{GitxError, Result};
use crate::ui;

/// One post for the activity feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
}

impl Message {
    pub fn new(body: impl Into<String>) -> Self {
        Message {
            body: body.into(),
            url: None,
            message_type: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_type(mut self, message_type: impl Into<String>) -> Self {
        self.message_type = Some(message_type.into());
        self
    }
}

pub trait Messenger {
    fn post(&self, message: &Message) -> Result<()>;
}

/// Posts messages as JSON to a webhook
pub struct WebhookMessenger {
    client: reqwest::blocking::Client,
    url: String,
}

impl WebhookMessenger {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .no_proxy()
            .build()?;
        Ok(WebhookMessenger {
            client,
            url: url.into(),
        })
    }
}

impl Messenger for WebhookMessenger {
    fn post(&self, message: &Message) -> Result<()> {
        debug!("posting message to {}", self.url);
        let response = self.client.post(&self.url).json(message).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GitxError::remote(format!(
                "message post returned {}",
                status
            )));
        }
        ui::display_success("Message has been posted");
        Ok(())
    }
}

/// Prints messages instead of posting them
#[derive(Debug, Default)]
pub struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    fn post(&self, message: &Message) -> Result<()> {
        ui::display_message(&message.body, message.url.as_deref());
        Ok(())
    }
}

/// Keeps posted messages in memory
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    posted: RefCell<Vec<Message>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        RecordingMessenger::default()
    }

    pub fn posted(&self) -> Vec<Message> {
        self.posted.borrow().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn post(&self, message: &Message) -> Result<()> {
        self.posted.borrow_mut().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_webhook_ignores_proxy_environment() {
        std::env::set_var("HTTPS_PROXY", "http://[::1");
        let messenger = WebhookMessenger::new("https://hooks.example.com/worklog");
        std::env::remove_var("HTTPS_PROXY");
        assert!(messenger.is_ok());
    }

    #[test]
    fn test_message_serialization_skips_empty_fields() {
        let json = serde_json::to_value(Message::new("#worklog hello")).unwrap();
        assert_eq!(json, serde_json::json!({ "body": "#worklog hello" }));

        let json = serde_json::to_value(
            Message::new("review")
                .with_url("http://example.com/pulls/1")
                .with_type("review_request"),
        )
        .unwrap();
        assert_eq!(json["url"], "http://example.com/pulls/1");
        assert_eq!(json["message_type"], "review_request");
    }

    #[test]
    fn test_recording_messenger() {
        let messenger = RecordingMessenger::new();
        messenger.post(&Message::new("one")).unwrap();
        messenger.post(&Message::new("two")).unwrap();
        let bodies: Vec<String> = messenger.posted().into_iter().map(|m| m.body).collect();
        assert_eq!(bodies, vec!["one", "two"]);
    }
}
