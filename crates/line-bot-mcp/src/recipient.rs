//! Recipient resolution
//!
//! A known group name wins over an explicit user ID, which wins over
//! the configured default recipient.

use line_bot_core::GatewayConfig;
use tracing::{debug, warn};

/// Where a resolved recipient came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientSource {
    Group,
    Explicit,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecipient {
    pub id: String,
    pub source: RecipientSource,
}

/// Resolve the destination of a push call
///
/// An unknown group name is not an error: it is logged and resolution
/// falls back to `user_id`, then to the default recipient. An empty
/// group name counts as absent.
pub fn resolve_recipient(
    config: &GatewayConfig,
    user_id: Option<&str>,
    group_name: Option<&str>,
) -> ResolvedRecipient {
    let group_name = group_name.filter(|name| !name.is_empty());

    match group_name {
        Some(name) if !config.group_resolution => {
            debug!(group_name = %name, "Group resolution disabled; ignoring group name");
        }
        Some(name) => {
            if let Some(id) = config.groups.get(name).filter(|id| !id.is_empty()) {
                debug!(group_name = %name, recipient = %id, "Resolved group name");
                return ResolvedRecipient {
                    id: id.to_string(),
                    source: RecipientSource::Group,
                };
            }
            warn!(group_name = %name, "Group name not found in mappings");
        }
        None => {}
    }

    match user_id {
        Some(id) => ResolvedRecipient {
            id: id.to_string(),
            source: RecipientSource::Explicit,
        },
        None => ResolvedRecipient {
            id: config.default_recipient.clone(),
            source: RecipientSource::Default,
        },
    }
}
