use crate::permissions::PermissionConfig;
use serde::Serialize;

/// Emitted by the live store after the in-memory record changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "permissions", rename_all = "lowercase")]
pub enum PermissionEvent {
    Hydrated(PermissionConfig),
    Updated(PermissionConfig),
    Reset(PermissionConfig),
}

impl PermissionEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            PermissionEvent::Hydrated(_) => "permissions_hydrated",
            PermissionEvent::Updated(_) => "permissions_updated",
            PermissionEvent::Reset(_) => "permissions_reset",
        }
    }

    pub fn permissions(&self) -> &PermissionConfig {
        match self {
            PermissionEvent::Hydrated(cfg)
            | PermissionEvent::Updated(cfg)
            | PermissionEvent::Reset(cfg) => cfg,
        }
    }
}

pub trait PermissionObserver: Send + Sync {
    fn on_event(&self, event: &PermissionEvent);
}

impl<F> PermissionObserver for F
where
    F: Fn(&PermissionEvent) + Send + Sync,
{
    fn on_event(&self, event: &PermissionEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_payload_is_tagged() {
        let event = PermissionEvent::Reset(PermissionConfig::default());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"], "reset");
        assert_eq!(value["permissions"]["showMetrics"], true);
        assert_eq!(event.topic(), "permissions_reset");
    }
}
