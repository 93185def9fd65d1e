use mqsign_core::{Context, OsEnv};
use mqsign_http_send_reqwest::ReqwestHttpSend;

/// Create a context that sends requests with a default `reqwest::Client` and
/// reads the os environment.
pub fn default_context() -> Context {
    default_context_with_client(reqwest::Client::new())
}

/// Create a context around a configured `reqwest::Client`.
///
/// Use this to set timeouts, long polling receives need one above their wait
/// time.
pub fn default_context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv)
}
