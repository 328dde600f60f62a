//! Author identity lookup, used for default answers only.

use log::warn;

/// Best effort author identity. Empty strings when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

pub trait IdentityProvider {
    fn identity(&self) -> Identity;
}

/// Reads `user.name` and `user.email` from the git configuration.
#[derive(Debug, Default)]
pub struct GitIdentity;

impl GitIdentity {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityProvider for GitIdentity {
    fn identity(&self) -> Identity {
        let config = match git2::Config::open_default() {
            Ok(config) => config,
            Err(e) => {
                warn!("Cannot read git configuration: {}", e.message());
                return Identity::default();
            }
        };

        Identity {
            name: config.get_string("user.name").unwrap_or_default(),
            email: config.get_string("user.email").unwrap_or_default(),
        }
    }
}

/// Fixed identity, for non-interactive runs that must not depend on the host.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Identity);

impl IdentityProvider for StaticIdentity {
    fn identity(&self) -> Identity {
        self.0.clone()
    }
}
