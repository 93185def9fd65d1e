//! Mapping from queue and message operations to unsigned http requests.

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};
use http::Method;
use mqsign_core::hash::{base64_encode, hex_md5};
use mqsign_core::Result;

use crate::constants::*;
use crate::endpoint::Endpoint;
use crate::model::{
    to_xml, to_xml_document, ListQueueOptions, MessageSubmission, QueueAttributes,
};

/// One call of the MQS api.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateQueue {
        queue: String,
        attributes: QueueAttributes,
    },
    SetQueueAttributes {
        queue: String,
        attributes: QueueAttributes,
    },
    GetQueueAttributes {
        queue: String,
    },
    DeleteQueue {
        queue: String,
    },
    ListQueue {
        options: ListQueueOptions,
    },
    SendMessage {
        queue: String,
        message: MessageSubmission,
    },
    ReceiveMessage {
        queue: String,
        wait_seconds: u64,
    },
    DeleteMessage {
        queue: String,
        receipt_handle: String,
    },
    PeekMessage {
        queue: String,
    },
    ChangeMessageVisibility {
        queue: String,
        receipt_handle: String,
        visibility_timeout: u64,
    },
}

impl Operation {
    /// Name of the operation as used in the api reference.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateQueue { .. } => "CreateQueue",
            Operation::SetQueueAttributes { .. } => "SetQueueAttributes",
            Operation::GetQueueAttributes { .. } => "GetQueueAttributes",
            Operation::DeleteQueue { .. } => "DeleteQueue",
            Operation::ListQueue { .. } => "ListQueue",
            Operation::SendMessage { .. } => "SendMessage",
            Operation::ReceiveMessage { .. } => "ReceiveMessage",
            Operation::DeleteMessage { .. } => "DeleteMessage",
            Operation::PeekMessage { .. } => "PeekMessage",
            Operation::ChangeMessageVisibility { .. } => "ChangeMessageVisibility",
        }
    }

    /// Http method of this operation.
    pub fn method(&self) -> Method {
        match self {
            Operation::CreateQueue { .. }
            | Operation::SetQueueAttributes { .. }
            | Operation::ChangeMessageVisibility { .. } => Method::PUT,
            Operation::GetQueueAttributes { .. }
            | Operation::ListQueue { .. }
            | Operation::ReceiveMessage { .. }
            | Operation::PeekMessage { .. } => Method::GET,
            Operation::DeleteQueue { .. } | Operation::DeleteMessage { .. } => Method::DELETE,
            Operation::SendMessage { .. } => Method::POST,
        }
    }

    /// Canonical resource: path plus query, exactly as signed and sent.
    ///
    /// Queue names and receipt handles are inserted verbatim.
    pub fn resource(&self) -> String {
        match self {
            Operation::CreateQueue { queue, .. }
            | Operation::GetQueueAttributes { queue }
            | Operation::DeleteQueue { queue } => format!("/{queue}"),
            Operation::SetQueueAttributes { queue, .. } => format!("/{queue}?metaoverride=true"),
            Operation::ListQueue { .. } => "/".to_string(),
            Operation::SendMessage { queue, .. } => format!("/{queue}/messages"),
            Operation::ReceiveMessage {
                queue,
                wait_seconds,
            } => format!("/{queue}/messages?waitseconds={wait_seconds}"),
            Operation::DeleteMessage {
                queue,
                receipt_handle,
            } => format!("/{queue}/messages?ReceiptHandle={receipt_handle}"),
            Operation::PeekMessage { queue } => format!("/{queue}/messages?peekonly=true"),
            Operation::ChangeMessageVisibility {
                queue,
                receipt_handle,
                visibility_timeout,
            } => format!(
                "/{queue}/messages?ReceiptHandle={receipt_handle}&VisibilityTimeout={visibility_timeout}"
            ),
        }
    }

    /// Request body, empty for operations without a document.
    pub fn body(&self) -> Result<Bytes> {
        let xml = match self {
            Operation::CreateQueue { attributes, .. }
            | Operation::SetQueueAttributes { attributes, .. } => to_xml_document(attributes)?,
            Operation::SendMessage { message, .. } => to_xml(message)?,
            _ => return Ok(Bytes::new()),
        };
        Ok(Bytes::from(xml))
    }

    /// `x-mqs-*` headers besides the version.
    ///
    /// Listing filters are only sent when they are not blank.
    pub fn mqs_headers(&self) -> Vec<(&'static str, String)> {
        let Operation::ListQueue { options } = self else {
            return Vec::new();
        };

        let mut headers = Vec::with_capacity(3);
        let non_blank = |v: &Option<String>| v.as_ref().filter(|v| !v.trim().is_empty()).cloned();
        if let Some(v) = non_blank(&options.prefix) {
            headers.push((X_MQS_LIST_PREFIX, v));
        }
        if let Some(v) = non_blank(&options.marker) {
            headers.push((X_MQS_LIST_MARKER, v));
        }
        if let Some(v) = options.ret_number {
            headers.push((X_MQS_LIST_RET_NUMBER, v.to_string()));
        }
        headers
    }

    /// Build the unsigned request against the endpoint.
    ///
    /// `Date` and `Authorization` are left to the signer.
    pub fn build(&self, endpoint: &Endpoint) -> Result<http::Request<Bytes>> {
        let body = self.body()?;

        let mut req = http::Request::builder()
            .method(self.method())
            .uri(endpoint.url(&self.resource()))
            .header(HOST, endpoint.authority())
            .header(CONTENT_TYPE, MQS_CONTENT_TYPE)
            .header(CONTENT_MD5, content_md5(&body))
            .header(CONTENT_LENGTH, body.len())
            .header(X_MQS_VERSION, MQS_VERSION);
        for (k, v) in self.mqs_headers() {
            req = req.header(k, v);
        }

        Ok(req.body(body)?)
    }
}

/// `Content-MD5` of a body: base64 of the hex encoded md5 digest, or empty
/// for an empty body.
pub fn content_md5(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    base64_encode(hex_md5(body).as_bytes())
}
