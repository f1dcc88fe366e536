//! Channel naming for Redis Pub/Sub.

use gym_core::{ClassId, Role};

/// Prefix for per-recipient notification channels
pub const NOTIFICATION_CHANNEL_PREFIX: &str = "notifications:";
/// Prefix for per-class roster channels
pub const CLASS_CHANNEL_PREFIX: &str = "class:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Notifications for one recipient, e.g. `notifications:trainer:7`
    Recipient { role: Role, id: i64 },
    /// Roster changes of one class
    Class(ClassId),
    Custom(String),
}

impl PubSubChannel {
    #[must_use]
    pub fn recipient(role: Role, id: i64) -> Self {
        Self::Recipient { role, id }
    }

    #[must_use]
    pub fn class(class_id: ClassId) -> Self {
        Self::Class(class_id)
    }

    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Recipient { role, id } => {
                format!("{NOTIFICATION_CHANNEL_PREFIX}{}:{id}", role.as_str())
            }
            Self::Class(id) => format!("{CLASS_CHANNEL_PREFIX}{id}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name; unknown shapes come back as `Custom`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if let Some(rest) = name.strip_prefix(NOTIFICATION_CHANNEL_PREFIX) {
            let parsed = rest.split_once(':').and_then(|(role, id)| {
                let role = Role::parse(role)?;
                let id = id.parse::<i64>().ok()?;
                Some(Self::Recipient { role, id })
            });
            if let Some(channel) = parsed {
                return channel;
            }
        } else if let Some(id) = name.strip_prefix(CLASS_CHANNEL_PREFIX) {
            if let Ok(class_id) = id.parse::<ClassId>() {
                return Self::Class(class_id);
            }
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
