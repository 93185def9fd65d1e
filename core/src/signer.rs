use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex, PoisonError};

/// Signer is the main struct used to sign the request.
///
/// The credential is loaded on first use and reused afterwards; everything
/// derived from the request (date, digest, signature) is computed again on
/// every call.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let credential = self.credential().await?;

        self.builder
            .sign_request(&self.ctx, req, credential.as_ref())
            .await
    }

    async fn credential(&self) -> Result<Option<K>> {
        let cached = self
            .credential
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if cached.is_valid() {
            return Ok(cached);
        }

        let loaded = self.loader.provide_credential(&self.ctx).await?;
        *self
            .credential
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = loaded.clone();
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct Token(String);

    impl SigningCredential for Token {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct CountingLoader(Arc<AtomicUsize>);

    #[async_trait]
    impl ProvideCredential for CountingLoader {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Token("token".to_string())))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    #[async_trait]
    impl SignRequest for HeaderSigner {
        type Credential = Token;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            credential: Option<&Token>,
        ) -> Result<()> {
            let token = credential.ok_or_else(|| Error::credential_invalid("missing"))?;
            req.headers.insert("x-token", token.0.parse()?);
            Ok(())
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::get("http://example.com/")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_credential_is_loaded_once() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(Context::new(), CountingLoader(calls.clone()), HeaderSigner);

        let mut first = parts();
        signer.sign(&mut first).await?;
        let mut second = parts();
        signer.clone().sign(&mut second).await?;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.headers["x-token"], "token");
        assert_eq!(second.headers["x-token"], "token");
        Ok(())
    }
}
