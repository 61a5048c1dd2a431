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

// Version tags of the canonical strings.
pub const HAWK_HEADER_VERSION: &str = "hawk.1.header";
pub const HAWK_PAYLOAD_VERSION: &str = "hawk.1.payload";

// Auth scheme of the Authorization header.
pub const HAWK_SCHEME: &str = "Hawk";

// Length of the random alphanumeric nonce.
pub const NONCE_LENGTH: usize = 6;

// Env values used by the hawk scheme.
pub const REQAUTH_HAWK_KEY_ID: &str = "REQAUTH_HAWK_KEY_ID";
pub const REQAUTH_HAWK_SHARED_SECRET: &str = "REQAUTH_HAWK_SHARED_SECRET";
pub const REQAUTH_HAWK_ALGORITHM: &str = "REQAUTH_HAWK_ALGORITHM";
pub const REQAUTH_HAWK_VERIFY_PAYLOAD: &str = "REQAUTH_HAWK_VERIFY_PAYLOAD";
pub const REQAUTH_HAWK_EXT: &str = "REQAUTH_HAWK_EXT";
