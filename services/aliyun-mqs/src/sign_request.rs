//! Aliyun MQS request signer.

use async_trait::async_trait;
use http::header::HeaderName;
use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use http::header::DATE;
use http::HeaderValue;
use log::debug;
use mqsign_core::hash::base64_hmac_sha1;
use mqsign_core::time::{format_http_date, now, DateTime};
use mqsign_core::utils::Redact;
use mqsign_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements the MQS authorization scheme.
///
/// The signer reads `Content-MD5`, `Content-Type`, every `x-mqs-*` header and
/// the resource from the request, then inserts `Date` and `Authorization`.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        let date = format_http_date(self.time.unwrap_or_else(now));

        let mut ctx = SigningRequest::build(parts)?;

        let string_to_sign = string_to_sign(
            ctx.method.as_str(),
            ctx.header_get_or_default(&HeaderName::from_static(CONTENT_MD5))?,
            ctx.header_get_or_default(&CONTENT_TYPE)?,
            &date,
            &canonicalize_headers(ctx.header_to_vec_with_prefix(X_MQS_PREFIX)?),
            &ctx.resource(),
        );
        let auth = authorization(cred, &string_to_sign);
        debug!("authorization: {}", Redact::from(&auth));

        ctx.headers.insert(DATE, date.parse()?);
        ctx.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = auth.parse()?;
            value.set_sensitive(true);

            value
        });

        ctx.apply(parts)
    }
}

/// Canonicalize the `x-mqs-*` headers.
///
/// Names are lower-cased and sorted ascending, each entry is rendered as
/// `name:value\n`. Values are kept as is.
///
/// ```
/// use mqsign_aliyun_mqs::canonicalize_headers;
///
/// let headers = [("X-MQS-Version", "2014-07-08"), ("x-mqs-marker", "abc")];
/// assert_eq!(
///     canonicalize_headers(headers),
///     "x-mqs-marker:abc\nx-mqs-version:2014-07-08\n"
/// );
/// ```
pub fn canonicalize_headers<K, V>(headers: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let headers = headers
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_lowercase(), v.as_ref().to_string()))
        .collect::<Vec<_>>();

    let mut s = SigningRequest::header_to_string(headers, ":", "\n");
    if !s.is_empty() {
        s.push('\n');
    }
    s
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// CanonicalizedMQSHeaders +
/// CanonicalizedResource;
/// ```
///
/// `canonicalized_headers` is the output of [`canonicalize_headers`], each
/// entry already ends with a newline so the resource follows it directly.
pub fn string_to_sign(
    method: &str,
    content_md5: &str,
    content_type: &str,
    date: &str,
    canonicalized_headers: &str,
    resource: &str,
) -> String {
    let s = format!(
        "{method}\n{content_md5}\n{content_type}\n{date}\n{canonicalized_headers}{resource}"
    );

    debug!("string to sign: {}", &s);
    s
}

/// Sign the string and build the `Authorization` header value:
/// `MQS <access_key_id>:<base64(hmac-sha1(access_key_secret, string_to_sign))>`.
pub fn authorization(cred: &Credential, string_to_sign: &str) -> String {
    let signature = base64_hmac_sha1(
        cred.access_key_secret.as_bytes(),
        string_to_sign.as_bytes(),
    );
    format!(
        "{MQS_AUTHORIZATION_SCHEME} {}:{signature}",
        cred.access_key_id
    )
}
