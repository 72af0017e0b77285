// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer};

use crate::driver::DriverError;

/// Mount request as handed over by the kubelet in the `mount` call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MounterArgs {
    #[serde(rename = "kubernetes.io/mounterArgs.FsGroup", deserialize_with = "null_as_default")]
    pub fs_group: String,
    // kubelet before 1.15
    #[serde(rename = "kubernetes.io/fsGroup", deserialize_with = "null_as_default")]
    pub fs_group_legacy: String,
    #[serde(rename = "kubernetes.io/fsType", deserialize_with = "null_as_default")]
    pub fs_type: String,
    #[serde(rename = "kubernetes.io/pod.name", deserialize_with = "null_as_default")]
    pub pod_name: String,
    #[serde(rename = "kubernetes.io/pod.namespace", deserialize_with = "null_as_default")]
    pub pod_namespace: String,
    #[serde(rename = "kubernetes.io/pod.uid", deserialize_with = "null_as_default")]
    pub pod_uid: String,
    #[serde(rename = "kubernetes.io/pvOrVolumeName", deserialize_with = "null_as_default")]
    pub pv_name: String,
    #[serde(rename = "kubernetes.io/readwrite", deserialize_with = "null_as_default")]
    pub read_write: String,
    #[serde(rename = "kubernetes.io/serviceAccount.name", deserialize_with = "null_as_default")]
    pub service_account: String,
    #[serde(rename = "mountOptions", deserialize_with = "null_as_default")]
    pub mount_options: String,
    #[serde(deserialize_with = "null_as_default")]
    pub opts: String,
    #[serde(deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(deserialize_with = "null_as_default")]
    pub share: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(rename = "passwdMethod", deserialize_with = "null_as_default")]
    pub passwd_method: String,
    #[serde(rename = "kubernetes.io/secret/domain", deserialize_with = "null_as_default")]
    pub credential_domain: String,
    #[serde(rename = "kubernetes.io/secret/username", deserialize_with = "null_as_default")]
    pub credential_user: String,
    #[serde(rename = "kubernetes.io/secret/password", deserialize_with = "null_as_default")]
    pub credential_pass: Password,
}

/// Credential password. Never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("\"\"")
        } else {
            f.write_str("<redacted>")
        }
    }
}

impl MounterArgs {
    /// Parses the JSON payload and base64-decodes the credential fields.
    pub fn decode(json: &str) -> Result<Self, DriverError> {
        let mut args: MounterArgs = serde_json::from_str(json)?;

        if !args.credential_domain.is_empty() {
            args.credential_domain = decode_credential("domain", &args.credential_domain)?;
        }
        if !args.credential_user.is_empty() {
            args.credential_user = decode_credential("user", &args.credential_user)?;
        }
        if !args.credential_pass.is_empty() {
            args.credential_pass = Password(decode_credential("password", &args.credential_pass.0)?);
        }

        Ok(args)
    }

    pub fn effective_fs_group(&self) -> Option<&str> {
        [&self.fs_group, &self.fs_group_legacy]
            .into_iter()
            .find(|g| !g.is_empty())
            .map(String::as_str)
    }
}

// An explicit `null` reads like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn decode_credential(field: &'static str, encoded: &str) -> Result<String, DriverError> {
    let cleaned: String = encoded
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect();
    let bytes = STANDARD
        .decode(cleaned)
        .map_err(|source| DriverError::CredentialEncoding { field, source })?;
    String::from_utf8(bytes).map_err(|source| DriverError::CredentialUtf8 { field, source })
}
