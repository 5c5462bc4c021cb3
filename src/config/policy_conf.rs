use std::env;
use tracing::debug;

use crate::config::{parse_flag, ConfigError};

/// Toggles for cross-entity reference checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyConfig {
    /// Require a group's admin and members to exist when they are written.
    pub verify_group_members: bool,
}

impl PolicyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let verify_group_members = match env::var("GROUP_VERIFY_MEMBERS") {
            Ok(raw) => parse_flag("GROUP_VERIFY_MEMBERS", &raw)?,
            Err(_) => false,
        };
        debug!("Group member verification: {}", verify_group_members);
        Ok(PolicyConfig { verify_group_members })
    }

    pub fn strict() -> Self {
        PolicyConfig { verify_group_members: true }
    }
}
