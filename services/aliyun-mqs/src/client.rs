use http::StatusCode;
use log::debug;
use mqsign_core::{Context, Error, ProvideCredential, Result, Signer};

use crate::endpoint::Endpoint;
use crate::model::{ListQueueOptions, MessageOptions, QueueOptions};
use crate::operation::Operation;
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};

/// Client for the MQS queue api.
///
/// Every call builds a request, signs it with a fresh date and sends it
/// exactly once. The body of the response is returned as is when the status
/// is 2xx or 3xx.
///
/// ```no_run
/// use mqsign_aliyun_mqs::{Client, Config, QueueOptions};
/// use mqsign_core::Context;
///
/// # async fn example(ctx: Context) -> mqsign_core::Result<()> {
/// let client = Client::from_config(ctx, Config::new())?;
/// client
///     .queue()
///     .create_queue("test", QueueOptions::new().with_delay_seconds(1))
///     .await?;
/// let _body = client.message().peek_message("test").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    signer: Signer<Credential>,
    endpoint: Endpoint,
}

impl Client {
    /// Create a client with the given credential provider.
    pub fn new(
        ctx: Context,
        endpoint: Endpoint,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        Self::with_signer(Signer::new(ctx, provider, RequestSigner::new()), endpoint)
    }

    /// Create a client from a prepared signer.
    pub fn with_signer(signer: Signer<Credential>, endpoint: Endpoint) -> Self {
        Self { signer, endpoint }
    }

    /// Create a client from config, values missing on it are loaded from env.
    ///
    /// Returns `ConfigInvalid` if owner id or endpoint can't be found.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let endpoint = Endpoint::from_config(&config)?;
        let provider = DefaultCredentialProvider::from_config(&config);

        Ok(Self::new(ctx, endpoint, provider))
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Queue management calls.
    pub fn queue(&self) -> Queue<'_> {
        Queue { client: self }
    }

    /// Message calls.
    pub fn message(&self) -> Message<'_> {
        Message { client: self }
    }

    /// Sign and send an operation, returning the response body.
    pub async fn execute(&self, op: Operation) -> Result<String> {
        let (mut parts, body) = op.build(&self.endpoint)?.into_parts();
        self.signer.sign(&mut parts).await?;

        debug!("sending {} request: {} {}", op.name(), parts.method, parts.uri);
        let resp = self
            .signer
            .context()
            .http_send_as_string(http::Request::from_parts(parts, body))
            .await?;
        debug!("{} responded with status {}", op.name(), resp.status());

        classify(resp.status(), resp.into_body())
    }
}

/// Statuses starting with 2 or 3 succeed, everything else is a rejection
/// carrying status and body.
pub(crate) fn classify(status: StatusCode, body: String) -> Result<String> {
    match status.as_u16() / 100 {
        2 | 3 => Ok(body),
        _ => Err(Error::service_rejected(status, body)),
    }
}

/// Queue management calls of a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Queue<'a> {
    client: &'a Client,
}

impl Queue<'_> {
    /// Create a queue, unset options take their defaults.
    pub async fn create_queue(&self, queue: &str, options: QueueOptions) -> Result<String> {
        self.client
            .execute(Operation::CreateQueue {
                queue: queue.to_string(),
                attributes: options.resolve(),
            })
            .await
    }

    /// Overwrite the attributes of a queue.
    ///
    /// Unset options are sent with their defaults, not the current values.
    pub async fn set_queue_attributes(&self, queue: &str, options: QueueOptions) -> Result<String> {
        self.client
            .execute(Operation::SetQueueAttributes {
                queue: queue.to_string(),
                attributes: options.resolve(),
            })
            .await
    }

    /// Fetch the attributes of a queue.
    pub async fn get_queue_attributes(&self, queue: &str) -> Result<String> {
        self.client
            .execute(Operation::GetQueueAttributes {
                queue: queue.to_string(),
            })
            .await
    }

    /// Delete a queue.
    pub async fn delete_queue(&self, queue: &str) -> Result<String> {
        self.client
            .execute(Operation::DeleteQueue {
                queue: queue.to_string(),
            })
            .await
    }

    /// List queues of the owner.
    pub async fn list_queue(&self, options: ListQueueOptions) -> Result<String> {
        self.client.execute(Operation::ListQueue { options }).await
    }
}

/// Message calls of a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    client: &'a Client,
}

impl Message<'_> {
    /// Send a message, unset options take their defaults.
    pub async fn send_message(
        &self,
        queue: &str,
        message_body: &str,
        options: MessageOptions,
    ) -> Result<String> {
        self.client
            .execute(Operation::SendMessage {
                queue: queue.to_string(),
                message: options.resolve(message_body),
            })
            .await
    }

    /// Receive a message, long polling up to `wait_seconds`.
    ///
    /// Configure the transport timeout above `wait_seconds`.
    pub async fn receive_message(&self, queue: &str, wait_seconds: u64) -> Result<String> {
        self.client
            .execute(Operation::ReceiveMessage {
                queue: queue.to_string(),
                wait_seconds,
            })
            .await
    }

    /// Delete a received message by its receipt handle.
    pub async fn delete_message(&self, queue: &str, receipt_handle: &str) -> Result<String> {
        self.client
            .execute(Operation::DeleteMessage {
                queue: queue.to_string(),
                receipt_handle: receipt_handle.to_string(),
            })
            .await
    }

    /// Look at the next message without changing its state.
    pub async fn peek_message(&self, queue: &str) -> Result<String> {
        self.client
            .execute(Operation::PeekMessage {
                queue: queue.to_string(),
            })
            .await
    }

    /// Change how long a received message stays invisible.
    pub async fn change_message_visibility(
        &self,
        queue: &str,
        receipt_handle: &str,
        visibility_timeout: u64,
    ) -> Result<String> {
        self.client
            .execute(Operation::ChangeMessageVisibility {
                queue: queue.to_string(),
                receipt_handle: receipt_handle.to_string(),
                visibility_timeout,
            })
            .await
    }
}
