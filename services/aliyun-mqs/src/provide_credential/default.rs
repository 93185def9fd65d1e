use async_trait::async_trait;
use mqsign_core::Result;
use mqsign_core::{Context, ProvideCredential, ProvideCredentialChain};

use crate::credential::Credential;
use crate::provide_credential::{EnvCredentialProvider, StaticCredentialProvider};
use crate::Config;

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Access key pair set on [`Config`], if built with [`DefaultCredentialProvider::from_config`]
/// 2. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create a provider that prefers the access key pair carried by config.
    pub fn from_config(config: &Config) -> Self {
        let provider = Self::new();
        match (&config.access_key_id, &config.access_key_secret) {
            (Some(ak), Some(sk)) => provider.push_front(StaticCredentialProvider::new(ak, sk)),
            _ => provider,
        }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mqsign_aliyun_mqs::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new("access_key_id", "access_key_secret"));
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use mqsign_core::StaticEnv;
    use std::collections::HashMap;

    fn env_ctx() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (
                    ALIBABA_CLOUD_ACCESS_KEY_ID.to_string(),
                    "env_access_key_id".to_string(),
                ),
                (
                    ALIBABA_CLOUD_ACCESS_KEY_SECRET.to_string(),
                    "env_access_key_secret".to_string(),
                ),
            ]),
        })
    }

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let loader = DefaultCredentialProvider::new();
        let credential = loader.provide_credential(&Context::new()).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let loader = DefaultCredentialProvider::new();
        let credential = loader
            .provide_credential(&env_ctx())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("env_access_key_id", credential.access_key_id);
        assert_eq!("env_access_key_secret", credential.access_key_secret);
    }

    #[tokio::test]
    async fn test_config_takes_priority_over_env() {
        let config = Config::new()
            .with_access_key_id("cfg_access_key_id")
            .with_access_key_secret("cfg_access_key_secret");
        let loader = DefaultCredentialProvider::from_config(&config);
        let credential = loader
            .provide_credential(&env_ctx())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("cfg_access_key_id", credential.access_key_id);
        assert_eq!("cfg_access_key_secret", credential.access_key_secret);
    }

    #[tokio::test]
    async fn test_partial_config_falls_back_to_env() {
        let config = Config::new().with_access_key_id("cfg_access_key_id");
        let loader = DefaultCredentialProvider::from_config(&config);
        let credential = loader
            .provide_credential(&env_ctx())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("env_access_key_id", credential.access_key_id);
    }
}
