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

// Env values used in aliyun mqs.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
pub const ALIBABA_CLOUD_MQS_OWNER_ID: &str = "ALIBABA_CLOUD_MQS_OWNER_ID";
pub const ALIBABA_CLOUD_MQS_ENDPOINT: &str = "ALIBABA_CLOUD_MQS_ENDPOINT";

// Headers used in mqs signing.
pub const CONTENT_MD5: &str = "content-md5";
pub const X_MQS_PREFIX: &str = "x-mqs-";
pub const X_MQS_VERSION: &str = "x-mqs-version";
pub const X_MQS_LIST_PREFIX: &str = "x-mqs-prefix";
pub const X_MQS_LIST_MARKER: &str = "x-mqs-marker";
pub const X_MQS_LIST_RET_NUMBER: &str = "x-mqs-ret-number";

/// API version sent in `x-mqs-version`.
pub const MQS_VERSION: &str = "2014-07-08";
/// Content type sent and signed with every request.
pub const MQS_CONTENT_TYPE: &str = "text/xml;utf-8";
/// Namespace of every xml document sent to mqs.
pub const MQS_XML_NAMESPACE: &str = "http://mqs.aliyuncs.com/doc/v1/";
/// Scheme tag of the authorization header.
pub const MQS_AUTHORIZATION_SCHEME: &str = "MQS";
