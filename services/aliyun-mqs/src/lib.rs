//! Aliyun MQS (Message Queue Service) client for mqsign.
//!
//! This crate signs and sends the queue and message calls of the MQS http
//! api. Every request carries an `Authorization: MQS <AccessKeyId>:<Signature>`
//! header where the signature is the base64 encoded HMAC-SHA1 of the verb,
//! `Content-MD5`, `Content-Type`, `Date`, the `x-mqs-*` headers and the
//! resource.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mqsign_aliyun_mqs::{Client, Endpoint, MessageOptions, StaticCredentialProvider};
//! use mqsign_core::{Context, OsEnv, Result};
//! use mqsign_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let client = Client::new(
//!         ctx,
//!         Endpoint::new("1234567890", "mqs-cn-beijing.aliyuncs.com"),
//!         StaticCredentialProvider::new("your-access-key-id", "your-access-key-secret"),
//!     );
//!
//!     client
//!         .message()
//!         .send_message("test", "hello", MessageOptions::new().with_priority(1))
//!         .await?;
//!     let body = client.message().receive_message("test", 10).await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`Client::from_config`] loads missing values from env:
//!
//! ```bash
//! export ALIBABA_CLOUD_ACCESS_KEY_ID=your-access-key-id
//! export ALIBABA_CLOUD_ACCESS_KEY_SECRET=your-access-key-secret
//! export ALIBABA_CLOUD_MQS_OWNER_ID=your-account-id
//! export ALIBABA_CLOUD_MQS_ENDPOINT=mqs-cn-beijing.aliyuncs.com
//! ```
//!
//! ## Responses
//!
//! Calls return the raw response body when the status is 2xx or 3xx. Other
//! statuses fail with [`mqsign_core::ErrorKind::ServiceRejected`], the status
//! and body are available on the error.

pub mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{authorization, canonicalize_headers, string_to_sign, RequestSigner};

mod provide_credential;
pub use provide_credential::*;

mod model;
pub use model::{
    from_xml, to_xml, to_xml_document, ListQueueOptions, MessageOptions, MessageSubmission,
    QueueAttributes, QueueOptions,
};

mod endpoint;
pub use endpoint::Endpoint;

mod operation;
pub use operation::{content_md5, Operation};

mod client;
pub use client::{Client, Message, Queue};
