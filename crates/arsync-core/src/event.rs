//! Tracking lifecycle events

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Pose, TargetId};

/// Event emitted by a tracking provider.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// A target came into view
    Detected(TargetId),
    /// A previously detected target is no longer tracked
    Lost(TargetId),
    /// New camera pose for the current frame
    Pose(Pose),
    /// Drawing surface or device orientation changed
    Resize,
    /// A frame is ready to be drawn
    Frame,
}

impl TrackingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TrackingEvent::Detected(_) => EventKind::Detected,
            TrackingEvent::Lost(_) => EventKind::Lost,
            TrackingEvent::Pose(_) => EventKind::Pose,
            TrackingEvent::Resize => EventKind::Resize,
            TrackingEvent::Frame => EventKind::Frame,
        }
    }
}

/// Subscribable event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Detected,
    Lost,
    Pose,
    Resize,
    Frame,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Detected,
        EventKind::Lost,
        EventKind::Pose,
        EventKind::Resize,
        EventKind::Frame,
    ];

    /// Name the provider uses for this event.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Detected => "OnDetected",
            EventKind::Lost => "OnLost",
            EventKind::Pose => "OnPose",
            EventKind::Resize => "OnResize",
            EventKind::Frame => "OnFrame",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown event name: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for EventKind {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Set of subscribed event kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subscriptions(u8);

impl Subscriptions {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, kind: EventKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
        }
        assert_eq!(
            "OnTouch".parse::<EventKind>(),
            Err(UnknownEvent("OnTouch".to_string()))
        );
    }

    #[test]
    fn test_subscriptions() {
        let mut subs = Subscriptions::none();
        assert!(!subs.contains(EventKind::Pose));

        subs.insert(EventKind::Pose);
        assert!(subs.contains(EventKind::Pose));
        assert!(!subs.contains(EventKind::Frame));
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(TrackingEvent::Detected("a".into()).kind(), EventKind::Detected);
        assert_eq!(TrackingEvent::Frame.kind(), EventKind::Frame);
    }
}
