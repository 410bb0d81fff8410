//! Credential resolution.
//!
//! Every adapter resolves its credentials before touching the network.
//! [`resolve`] checks the bag against [`Platform::required_credentials`]
//! and either hands back a [`ResolvedCredentials`] view or fails with
//! [`PublishError::MissingCredentials`] naming every absent field.

use mediapost_types::{Credentials, Platform, PublishError, Result, SecretString};

/// A credentials bag known to hold every field its platform requires.
#[derive(Debug)]
pub struct ResolvedCredentials<'a> {
    platform: Platform,
    bag: &'a Credentials,
}

impl<'a> ResolvedCredentials<'a> {
    /// The platform these credentials were resolved for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Raw value of `field`. Empty for fields outside the required set that
    /// the caller did not supply.
    pub fn get(&self, field: &str) -> &'a str {
        self.bag.get(field).map(SecretString::expose).unwrap_or_default()
    }
}

/// Validate `bag` against the fields `platform` requires.
///
/// Absent and blank fields are both reported, in declaration order. No
/// I/O happens here.
pub fn resolve(platform: Platform, bag: &Credentials) -> Result<ResolvedCredentials<'_>> {
    let missing = bag.missing(platform.required_credentials());
    if !missing.is_empty() {
        return Err(PublishError::MissingCredentials {
            platform,
            fields: missing.into_iter().map(str::to_owned).collect(),
        });
    }
    Ok(ResolvedCredentials { platform, bag })
}
