//! One-time provisioning passwords for newly inserted directory users.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Serialize, Serializer};

/// Bytes of entropy drawn per password, before encoding.
pub const PASSWORD_ENTROPY_BYTES: usize = 32;

const REDACTED: &str = "<redacted>";

/// A random URL-safe token used as the initial password of a new account.
///
/// `Debug` and `Display` never print the token. Serialization does, since the
/// value has to reach the directory API; use [`UserBody::redacted`] before
/// printing a request body.
///
/// [`UserBody::redacted`]: crate::types::UserBody::redacted
#[derive(Clone, PartialEq, Eq)]
pub struct ProvisioningPassword(String);

impl ProvisioningPassword {
    /// Draw a fresh token from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; PASSWORD_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub(crate) fn redacted() -> Self {
        Self(REDACTED.to_owned())
    }

    pub fn is_redacted(&self) -> bool {
        self.0 == REDACTED
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProvisioningPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProvisioningPassword(<redacted>)")
    }
}

impl fmt::Display for ProvisioningPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for ProvisioningPassword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
