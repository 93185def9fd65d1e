use http::uri::Scheme;
use mqsign_core::{Error, Result};

use crate::Config;

/// Where the queues of one account live.
///
/// Requests are sent to `{scheme}://{owner_id}.{host}{resource}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    owner_id: String,
    host: String,
}

impl Endpoint {
    /// Create an http endpoint for the owner on the host, like
    /// `mqs-cn-beijing.aliyuncs.com`.
    pub fn new(owner_id: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: Scheme::HTTP,
            owner_id: owner_id.into(),
            host: host.into(),
        }
    }

    /// Use another scheme, `https` for example.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Build the endpoint from a loaded config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let owner_id = match config.owner_id.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::config_invalid("owner_id is required")),
        };
        let host = match config.endpoint.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::config_invalid("endpoint is required")),
        };
        let scheme = match config.scheme.as_deref() {
            None => Scheme::HTTP,
            Some(s) if s.eq_ignore_ascii_case("http") => Scheme::HTTP,
            Some(s) if s.eq_ignore_ascii_case("https") => Scheme::HTTPS,
            Some(s) => {
                return Err(Error::config_invalid(format!(
                    "scheme must be http or https, got {s}"
                )))
            }
        };

        Ok(Self::new(owner_id, host).with_scheme(scheme))
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The value of the `Host` header: `{owner_id}.{host}`.
    pub fn authority(&self) -> String {
        format!("{}.{}", self.owner_id, self.host)
    }

    /// Full url of the resource.
    pub fn url(&self, resource: &str) -> String {
        format!("{}://{}{}", self.scheme, self.authority(), resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqsign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url() {
        let ep = Endpoint::new("1234", "mqs-cn-beijing.aliyuncs.com");
        assert_eq!(ep.authority(), "1234.mqs-cn-beijing.aliyuncs.com");
        assert_eq!(
            ep.url("/test/messages?peekonly=true"),
            "http://1234.mqs-cn-beijing.aliyuncs.com/test/messages?peekonly=true"
        );

        let ep = ep.with_scheme(Scheme::HTTPS);
        assert_eq!(ep.url("/"), "https://1234.mqs-cn-beijing.aliyuncs.com/");
    }

    #[test]
    fn test_from_config() -> Result<()> {
        let cfg = Config::new()
            .with_owner_id("1234")
            .with_endpoint("mqs-cn-hangzhou.aliyuncs.com")
            .with_scheme("HTTPS");
        let ep = Endpoint::from_config(&cfg)?;

        assert_eq!(ep.scheme(), &Scheme::HTTPS);
        assert_eq!(ep.owner_id(), "1234");
        assert_eq!(ep.host(), "mqs-cn-hangzhou.aliyuncs.com");
        Ok(())
    }

    #[test]
    fn test_from_config_missing_fields() {
        let err =
            Endpoint::from_config(&Config::new().with_endpoint("mqs.example.com")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Endpoint::from_config(&Config::new().with_owner_id("1234").with_endpoint(" "))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Endpoint::from_config(
            &Config::new()
                .with_owner_id("1234")
                .with_endpoint("mqs.example.com")
                .with_scheme("ftp"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
