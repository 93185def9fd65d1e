//! Request documents and the options they are resolved from.

use mqsign_core::{Error, Result};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::MQS_XML_NAMESPACE;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub const DEFAULT_DELAY_SECONDS: u64 = 0;
pub const DEFAULT_MAXIMUM_MESSAGE_SIZE: u64 = 65536;
pub const DEFAULT_MESSAGE_RETENTION_PERIOD: u64 = 345600;
pub const DEFAULT_VISIBILITY_TIMEOUT: u64 = 30;
pub const DEFAULT_POLLING_WAIT_SECONDS: u64 = 0;
pub const DEFAULT_PRIORITY: u64 = 8;

/// Serialize a document as xml, without declaration.
///
/// `Message` bodies are sent like this.
pub fn to_xml<T: Serialize>(value: &T) -> Result<String> {
    quick_xml::se::to_string(value)
        .map_err(|e| Error::encode_failed("failed to serialize xml body").with_source(e))
}

/// Serialize a document as xml prefixed with the xml declaration.
///
/// `Queue` bodies are sent like this.
pub fn to_xml_document<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{XML_DECLARATION}{}", to_xml(value)?))
}

/// Decode a document produced by [`to_xml`] or [`to_xml_document`].
///
/// Fields missing from the document are decoded as zero, which is how zero
/// values are sent.
pub fn from_xml<T: for<'de> Deserialize<'de>>(xml: &str) -> Result<T> {
    quick_xml::de::from_str(xml)
        .map_err(|e| Error::unexpected("failed to deserialize xml body").with_source(e))
}

/// Attributes of a queue, sent as the `Queue` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueAttributes {
    #[serde(default)]
    pub delay_seconds: u64,
    #[serde(default)]
    pub maximum_message_size: u64,
    #[serde(default)]
    pub message_retention_period: u64,
    #[serde(default)]
    pub visibility_timeout: u64,
    #[serde(default)]
    pub polling_wait_seconds: u64,
}

impl Default for QueueAttributes {
    fn default() -> Self {
        Self {
            delay_seconds: DEFAULT_DELAY_SECONDS,
            maximum_message_size: DEFAULT_MAXIMUM_MESSAGE_SIZE,
            message_retention_period: DEFAULT_MESSAGE_RETENTION_PERIOD,
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
            polling_wait_seconds: DEFAULT_POLLING_WAIT_SECONDS,
        }
    }
}

impl Serialize for QueueAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Queue", 6)?;
        s.serialize_field("@xmlns", MQS_XML_NAMESPACE)?;
        for (name, value) in [
            ("DelaySeconds", self.delay_seconds),
            ("MaximumMessageSize", self.maximum_message_size),
            ("MessageRetentionPeriod", self.message_retention_period),
            ("VisibilityTimeout", self.visibility_timeout),
            ("PollingWaitSeconds", self.polling_wait_seconds),
        ] {
            serialize_non_zero(&mut s, name, value)?;
        }
        s.end()
    }
}

/// A message to submit, sent as the `Message` document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageSubmission {
    #[serde(default)]
    pub message_body: String,
    #[serde(default)]
    pub delay_seconds: u64,
    #[serde(default)]
    pub priority: u64,
}

impl MessageSubmission {
    /// Create a submission carrying `message_body` with default options.
    pub fn new(message_body: impl Into<String>) -> Self {
        MessageOptions::default().resolve(message_body)
    }
}

impl Serialize for MessageSubmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Message", 4)?;
        s.serialize_field("@xmlns", MQS_XML_NAMESPACE)?;
        if self.message_body.is_empty() {
            s.skip_field("MessageBody")?;
        } else {
            s.serialize_field("MessageBody", &self.message_body)?;
        }
        serialize_non_zero(&mut s, "DelaySeconds", self.delay_seconds)?;
        serialize_non_zero(&mut s, "Priority", self.priority)?;
        s.end()
    }
}

fn serialize_non_zero<S: SerializeStruct>(
    s: &mut S,
    name: &'static str,
    value: u64,
) -> std::result::Result<(), S::Error> {
    if value == 0 {
        s.skip_field(name)
    } else {
        s.serialize_field(name, &value)
    }
}

/// Caller supplied queue options.
///
/// Unset fields fall back to the defaults of [`QueueAttributes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueOptions {
    pub delay_seconds: Option<u64>,
    pub maximum_message_size: Option<u64>,
    pub message_retention_period: Option<u64>,
    pub visibility_timeout: Option<u64>,
    pub polling_wait_seconds: Option<u64>,
}

impl QueueOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from `(name, value)` pairs using the wire names, like
    /// `("DelaySeconds", 1)`.
    ///
    /// Names that are not queue attributes are ignored.
    pub fn from_pairs<K: AsRef<str>>(pairs: impl IntoIterator<Item = (K, u64)>) -> Self {
        let mut opts = Self::default();
        for (k, v) in pairs {
            match k.as_ref() {
                "DelaySeconds" => opts.delay_seconds = Some(v),
                "MaximumMessageSize" => opts.maximum_message_size = Some(v),
                "MessageRetentionPeriod" => opts.message_retention_period = Some(v),
                "VisibilityTimeout" => opts.visibility_timeout = Some(v),
                "PollingWaitSeconds" => opts.polling_wait_seconds = Some(v),
                _ => {}
            }
        }
        opts
    }

    pub fn with_delay_seconds(mut self, v: u64) -> Self {
        self.delay_seconds = Some(v);
        self
    }

    pub fn with_maximum_message_size(mut self, v: u64) -> Self {
        self.maximum_message_size = Some(v);
        self
    }

    pub fn with_message_retention_period(mut self, v: u64) -> Self {
        self.message_retention_period = Some(v);
        self
    }

    pub fn with_visibility_timeout(mut self, v: u64) -> Self {
        self.visibility_timeout = Some(v);
        self
    }

    pub fn with_polling_wait_seconds(mut self, v: u64) -> Self {
        self.polling_wait_seconds = Some(v);
        self
    }

    /// Resolve the options over the defaults.
    pub fn resolve(&self) -> QueueAttributes {
        let d = QueueAttributes::default();
        QueueAttributes {
            delay_seconds: self.delay_seconds.unwrap_or(d.delay_seconds),
            maximum_message_size: self.maximum_message_size.unwrap_or(d.maximum_message_size),
            message_retention_period: self
                .message_retention_period
                .unwrap_or(d.message_retention_period),
            visibility_timeout: self.visibility_timeout.unwrap_or(d.visibility_timeout),
            polling_wait_seconds: self.polling_wait_seconds.unwrap_or(d.polling_wait_seconds),
        }
    }
}

/// Caller supplied message options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageOptions {
    pub delay_seconds: Option<u64>,
    /// 1 is the highest priority, 16 the lowest.
    pub priority: Option<u64>,
}

impl MessageOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from `(name, value)` pairs using the wire names.
    ///
    /// Names other than `DelaySeconds` and `Priority` are ignored.
    pub fn from_pairs<K: AsRef<str>>(pairs: impl IntoIterator<Item = (K, u64)>) -> Self {
        let mut opts = Self::default();
        for (k, v) in pairs {
            match k.as_ref() {
                "DelaySeconds" => opts.delay_seconds = Some(v),
                "Priority" => opts.priority = Some(v),
                _ => {}
            }
        }
        opts
    }

    pub fn with_delay_seconds(mut self, v: u64) -> Self {
        self.delay_seconds = Some(v);
        self
    }

    pub fn with_priority(mut self, v: u64) -> Self {
        self.priority = Some(v);
        self
    }

    /// Resolve the options over the defaults for the given body.
    pub fn resolve(&self, message_body: impl Into<String>) -> MessageSubmission {
        MessageSubmission {
            message_body: message_body.into(),
            delay_seconds: self.delay_seconds.unwrap_or(DEFAULT_DELAY_SECONDS),
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
        }
    }
}

/// Filters for listing queues.
///
/// Blank values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQueueOptions {
    /// Only list queues whose name starts with this prefix.
    pub prefix: Option<String>,
    /// Continue listing from the marker returned by a previous page.
    pub marker: Option<String>,
    /// Page size.
    pub ret_number: Option<u32>,
}

impl ListQueueOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_ret_number(mut self, ret_number: u32) -> Self {
        self.ret_number = Some(ret_number);
        self
    }
}
