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

//! Hash related utils.

use crate::Error;
use crate::Result;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha1::Sha1;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::unexpected("base64 decode failed").with_source(e))
}

/// Base64 encoded SHA256 hash.
pub fn base64_sha256(content: &[u8]) -> String {
    base64_encode(Sha256::digest(content).as_slice())
}

fn hmac_key_error(e: hmac::digest::InvalidLength) -> Error {
    Error::digest_unavailable("hmac key setup failed").with_source(anyhow::Error::msg(e))
}

/// Base64 encoded HMAC with SHA1 hash.
pub fn base64_hmac_sha1(key: &[u8], content: &[u8]) -> Result<String> {
    let mut h = Hmac::<Sha1>::new_from_slice(key).map_err(hmac_key_error)?;
    h.update(content);

    Ok(base64_encode(&h.finalize().into_bytes()))
}

/// Base64 encoded HMAC with SHA256 hash.
pub fn base64_hmac_sha256(key: &[u8], content: &[u8]) -> Result<String> {
    let mut h = Hmac::<Sha256>::new_from_slice(key).map_err(hmac_key_error)?;
    h.update(content);

    Ok(base64_encode(&h.finalize().into_bytes()))
}

/// Base64 encoded HMAC with SHA384 hash.
pub fn base64_hmac_sha384(key: &[u8], content: &[u8]) -> Result<String> {
    let mut h = Hmac::<Sha384>::new_from_slice(key).map_err(hmac_key_error)?;
    h.update(content);

    Ok(base64_encode(&h.finalize().into_bytes()))
}

/// Base64 encoded HMAC with SHA512 hash.
pub fn base64_hmac_sha512(key: &[u8], content: &[u8]) -> Result<String> {
    let mut h = Hmac::<Sha512>::new_from_slice(key).map_err(hmac_key_error)?;
    h.update(content);

    Ok(base64_encode(&h.finalize().into_bytes()))
}
