// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Aliyun MQS support with convenience APIs

pub use mqsign_aliyun_mqs::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Result};

/// Create a client from the os environment using the default context.
///
/// Owner id and endpoint are read from `ALIBABA_CLOUD_MQS_OWNER_ID` and
/// `ALIBABA_CLOUD_MQS_ENDPOINT`, credentials from the default provider
/// chain.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> mqsign::Result<()> {
/// let client = mqsign::aliyun::default_client()?;
/// let body = client.message().peek_message("test").await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client() -> Result<Client> {
    default_client_with_config(Config::new())
}

/// Like [`default_client`], values set on `config` win over the env.
#[cfg(feature = "default-context")]
pub fn default_client_with_config(config: Config) -> Result<Client> {
    Client::from_config(default_context(), config)
}
