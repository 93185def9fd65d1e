//! Client tests against a transport that records requests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE, HOST};
use http::{Method, StatusCode};
use mqsign_aliyun_mqs::constants::{CONTENT_MD5, X_MQS_PREFIX};
use mqsign_aliyun_mqs::{
    authorization, canonicalize_headers, content_md5, from_xml, string_to_sign, Client,
    Credential, Endpoint, EnvCredentialProvider, ListQueueOptions, MessageOptions,
    MessageSubmission, QueueAttributes, QueueOptions, StaticCredentialProvider,
};
use mqsign_core::{Context, ErrorKind, HttpSend, Result};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone)]
struct RecordingHttpSend {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl RecordingHttpSend {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<http::Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl HttpSend for RecordingHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(self.body.as_bytes()))?)
    }
}

fn client(http: RecordingHttpSend) -> Client {
    Client::new(
        Context::new().with_http_send(http),
        Endpoint::new("1234", "mqs-cn-beijing.aliyuncs.com"),
        StaticCredentialProvider::new("access_key", "123456"),
    )
}

fn header<'a>(req: &'a http::Request<Bytes>, name: &str) -> &'a str {
    req.headers()[name].to_str().unwrap()
}

/// Recompute the authorization of a sent request.
fn expected_authorization(req: &http::Request<Bytes>) -> String {
    let mqs_headers = req
        .headers()
        .iter()
        .filter(|(k, _)| k.as_str().starts_with(X_MQS_PREFIX))
        .map(|(k, v)| (k.as_str(), v.to_str().unwrap()));
    let resource = req.uri().path_and_query().unwrap().as_str();

    authorization(
        &Credential::new("access_key", "123456"),
        &string_to_sign(
            req.method().as_str(),
            header(req, CONTENT_MD5),
            header(req, CONTENT_TYPE.as_str()),
            header(req, DATE.as_str()),
            &canonicalize_headers(mqs_headers),
            resource,
        ),
    )
}

#[tokio::test]
async fn test_create_queue() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::CREATED, "");
    let client = client(http.clone());

    client
        .queue()
        .create_queue("test", QueueOptions::from_pairs([("DelaySeconds", 1)]))
        .await?;

    let reqs = http.requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];

    assert_eq!(req.method(), Method::PUT);
    assert_eq!(
        req.uri().to_string(),
        "http://1234.mqs-cn-beijing.aliyuncs.com/test"
    );
    assert_eq!(header(req, HOST.as_str()), "1234.mqs-cn-beijing.aliyuncs.com");
    assert_eq!(header(req, CONTENT_MD5), content_md5(req.body()));
    assert!(header(req, AUTHORIZATION.as_str()).starts_with("MQS access_key:"));
    assert!(header(req, DATE.as_str()).ends_with(" GMT"));
    assert_eq!(header(req, AUTHORIZATION.as_str()), expected_authorization(req));

    let body = std::str::from_utf8(req.body()).unwrap();
    let attrs: QueueAttributes = from_xml(body)?;
    assert_eq!(
        attrs,
        QueueAttributes {
            delay_seconds: 1,
            ..QueueAttributes::default()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_set_queue_attributes() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::NO_CONTENT, "");
    let client = client(http.clone());

    client
        .queue()
        .set_queue_attributes("test", QueueOptions::new().with_visibility_timeout(60))
        .await?;

    let req = &http.requests()[0];
    assert_eq!(req.method(), Method::PUT);
    assert_eq!(
        req.uri().path_and_query().unwrap().as_str(),
        "/test?metaoverride=true"
    );
    let attrs: QueueAttributes = from_xml(std::str::from_utf8(req.body()).unwrap())?;
    assert_eq!(attrs.visibility_timeout, 60);
    assert_eq!(header(req, AUTHORIZATION.as_str()), expected_authorization(req));
    Ok(())
}

#[tokio::test]
async fn test_queue_calls_without_body() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "<Queue/>");
    let client = client(http.clone());

    assert_eq!(client.queue().get_queue_attributes("test").await?, "<Queue/>");
    client.queue().delete_queue("test").await?;

    let reqs = http.requests();
    assert_eq!(reqs[0].method(), Method::GET);
    assert_eq!(reqs[0].uri().path(), "/test");
    assert_eq!(reqs[1].method(), Method::DELETE);
    assert_eq!(reqs[1].uri().path(), "/test");
    for req in &reqs {
        assert!(req.body().is_empty());
        assert_eq!(header(req, CONTENT_MD5), "");
        assert_eq!(header(req, AUTHORIZATION.as_str()), expected_authorization(req));
    }
    Ok(())
}

#[tokio::test]
async fn test_list_queue() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "<Queues/>");
    let client = client(http.clone());

    client
        .queue()
        .list_queue(
            ListQueueOptions::new()
                .with_prefix("te")
                .with_marker("")
                .with_ret_number(10),
        )
        .await?;

    let req = &http.requests()[0];
    assert_eq!(req.uri().path(), "/");
    assert_eq!(header(req, "x-mqs-prefix"), "te");
    assert_eq!(header(req, "x-mqs-ret-number"), "10");
    assert!(req.headers().get("x-mqs-marker").is_none());
    assert_eq!(header(req, AUTHORIZATION.as_str()), expected_authorization(req));
    Ok(())
}

#[tokio::test]
async fn test_send_message() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::CREATED, "<Message/>");
    let client = client(http.clone());

    client
        .message()
        .send_message("test", "hello", MessageOptions::new().with_delay_seconds(3))
        .await?;

    let req = &http.requests()[0];
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri().path(), "/test/messages");

    let msg: MessageSubmission = from_xml(std::str::from_utf8(req.body()).unwrap())?;
    assert_eq!(
        msg,
        MessageSubmission {
            message_body: "hello".to_string(),
            delay_seconds: 3,
            priority: 8,
        }
    );
    assert!(req.body().starts_with(b"<Message xmlns="));
    assert_eq!(header(req, CONTENT_MD5), content_md5(req.body()));
    Ok(())
}

#[tokio::test]
async fn test_receive_and_delete_message() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "<Message/>");
    let client = client(http.clone());

    client.message().receive_message("test", 10).await?;
    client.message().delete_message("test", "abc123").await?;

    let reqs = http.requests();
    assert_eq!(reqs[0].method(), Method::GET);
    assert_eq!(
        reqs[0].uri().path_and_query().unwrap().as_str(),
        "/test/messages?waitseconds=10"
    );
    assert_eq!(reqs[1].method(), Method::DELETE);
    assert_eq!(
        reqs[1].uri().path_and_query().unwrap().as_str(),
        "/test/messages?ReceiptHandle=abc123"
    );
    Ok(())
}

#[tokio::test]
async fn test_peek_message() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "<Message/>");
    let client = client(http.clone());

    let body = client.message().peek_message("test").await?;
    assert_eq!(body, "<Message/>");

    let req = &http.requests()[0];
    assert_eq!(req.method(), Method::GET);
    assert_eq!(
        req.uri().path_and_query().unwrap().as_str(),
        "/test/messages?peekonly=true"
    );
    assert!(req.body().is_empty());
    assert_eq!(header(req, CONTENT_MD5), "");
    assert_eq!(header(req, AUTHORIZATION.as_str()), expected_authorization(req));
    Ok(())
}

#[tokio::test]
async fn test_change_message_visibility() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "<ChangeVisibility/>");
    let client = client(http.clone());

    client
        .message()
        .change_message_visibility("test", "abc123", 60)
        .await?;

    let req = &http.requests()[0];
    assert_eq!(req.method(), Method::PUT);
    assert_eq!(
        req.uri().path_and_query().unwrap().as_str(),
        "/test/messages?ReceiptHandle=abc123&VisibilityTimeout=60"
    );
    assert_eq!(header(req, AUTHORIZATION.as_str()), expected_authorization(req));
    Ok(())
}

#[tokio::test]
async fn test_redirect_status_is_success() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::FOUND, "moved");
    let client = client(http);

    assert_eq!(client.message().peek_message("test").await?, "moved");
    Ok(())
}

#[tokio::test]
async fn test_rejected_status_keeps_status_and_body() {
    let http = RecordingHttpSend::new(
        StatusCode::NOT_FOUND,
        "<Error><Code>QueueNotExist</Code></Error>",
    );
    let client = client(http.clone());

    let err = client.queue().delete_queue("missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServiceRejected);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        err.response_body(),
        Some("<Error><Code>QueueNotExist</Code></Error>")
    );
    assert!(err.to_string().contains("Code:404"));
    assert_eq!(http.requests().len(), 1);
}

#[tokio::test]
async fn test_transport_failure() {
    let client = Client::new(
        Context::new(),
        Endpoint::new("1234", "mqs-cn-beijing.aliyuncs.com"),
        StaticCredentialProvider::new("access_key", "123456"),
    );

    let err = client.message().peek_message("test").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportFailed);
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = Client::new(
        Context::new().with_http_send(http.clone()),
        Endpoint::new("1234", "mqs-cn-beijing.aliyuncs.com"),
        EnvCredentialProvider::new(),
    );

    let err = client.message().peek_message("test").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_clones_share_endpoint() {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client(http.clone());
    let cloned = client.clone();

    let client_message = client.message();
    let cloned_message = cloned.message();
    let (a, b) = tokio::join!(
        client_message.peek_message("a"),
        cloned_message.peek_message("b")
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(http.requests().len(), 2);
    assert_eq!(cloned.endpoint(), client.endpoint());
}
