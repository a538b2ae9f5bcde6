//! Multimedia message handoff.
//!
//! Hands a recipient, an optional text body and a local attachment to the
//! platform's messaging app. Everything platform-owned (file access, content
//! URIs, default app lookup, launching the send screen) sits behind
//! [`MessagingPlatform`]. The handoff is fire-and-forget: success means the
//! platform accepted the intent, not that a message was delivered.

mod mime;

pub use mime::*;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Method name accepted by [`handle_method_call`].
pub const SEND_MMS_METHOD: &str = "sendMms";

/// Handoff failures.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    #[error("No application can handle the message")]
    NoHandler,

    #[error("Platform error: {0}")]
    Platform(String),
}

/// A multimedia message to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmsRequest {
    pub address: String,
    pub attachment_path: PathBuf,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MmsArgs {
    address: Option<String>,
    attachment_path: Option<String>,
    message: Option<String>,
}

impl MmsRequest {
    /// Parse loosely-typed call arguments (`address`, `attachmentPath`,
    /// optional `message`).
    pub fn from_args(args: &Value) -> Result<Self, HandoffError> {
        let args = MmsArgs::deserialize(args)
            .map_err(|e| HandoffError::InvalidArguments(e.to_string()))?;

        match (args.address, args.attachment_path) {
            (Some(address), Some(path)) => Ok(Self {
                address,
                attachment_path: PathBuf::from(path),
                message: args.message,
            }),
            _ => Err(HandoffError::InvalidArguments(
                "Address or attachmentPath is null".to_string(),
            )),
        }
    }
}

/// The send request handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendIntent {
    pub address: String,
    /// Message text, empty when none was given.
    pub body: String,
    /// Content URI of the attachment.
    pub stream: String,
    pub mime_type: &'static str,
    /// Preferred messaging app. `None` lets any capable app handle it.
    pub target_package: Option<String>,
    /// Grant the receiving app read access to `stream`.
    pub grant_read: bool,
}

/// Platform services the handoff depends on.
pub trait MessagingPlatform {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Expose a local file to other apps.
    fn content_uri_for(&self, path: &Path) -> Result<String, HandoffError>;

    /// Identifier of the user's default messaging app, if one is set.
    fn default_messaging_app(&self) -> Option<String>;

    /// Launch the send screen.
    fn start_send(&self, intent: &SendIntent) -> Result<(), HandoffError>;
}

/// Validate the attachment and hand the message to the platform.
pub fn send_multimedia_message<P>(platform: &P, request: &MmsRequest) -> Result<(), HandoffError>
where
    P: MessagingPlatform + ?Sized,
{
    let path = request.attachment_path.as_path();
    if !platform.file_exists(path) {
        return Err(HandoffError::FileNotFound(path.to_path_buf()));
    }

    let stream = platform.content_uri_for(path)?;
    let mime_type = mime_for_path(path);
    let target_package = platform.default_messaging_app();

    tracing::debug!(
        mime_type,
        target = target_package.as_deref().unwrap_or("any"),
        "Handing off multimedia message"
    );

    let intent = SendIntent {
        address: request.address.clone(),
        body: request.message.clone().unwrap_or_default(),
        stream,
        mime_type,
        target_package,
        grant_read: true,
    };

    platform.start_send(&intent)
}

/// Entry point for a named method call from the client app.
pub fn handle_method_call<P>(platform: &P, method: &str, args: &Value) -> Result<(), HandoffError>
where
    P: MessagingPlatform + ?Sized,
{
    if method != SEND_MMS_METHOD {
        return Err(HandoffError::NotImplemented(method.to_string()));
    }

    let request = MmsRequest::from_args(args)?;
    send_multimedia_message(platform, &request)
}
