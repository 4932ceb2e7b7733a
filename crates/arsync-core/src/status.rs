//! Initialization error taxonomy and status screens

use std::fmt;

use serde::{Deserialize, Serialize};

/// Initialization failures the provider reports by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitErrorKind {
    Internal,
    Camera,
    Sensors,
    License,
}

impl InitErrorKind {
    pub const ALL: [InitErrorKind; 4] = [
        InitErrorKind::Internal,
        InitErrorKind::Camera,
        InitErrorKind::Sensors,
        InitErrorKind::License,
    ];

    /// Look up a kind by the provider's error name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitErrorKind::Internal => "INTERNAL_ERROR",
            InitErrorKind::Camera => "CAMERA_ERROR",
            InitErrorKind::Sensors => "SENSORS_ERROR",
            InitErrorKind::License => "LICENSE_ERROR",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InitErrorKind::Internal => "Internal Error",
            InitErrorKind::Camera => "Camera Error",
            InitErrorKind::Sensors => "Sensors Error",
            InitErrorKind::License => "License Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            InitErrorKind::Internal => {
                "An unespecified error has occurred. Your device might not be compatible with this experience."
            }
            InitErrorKind::Camera => {
                "Could not access to your device's camera. Please, ensure you have given required permissions from your browser settings."
            }
            InitErrorKind::Sensors => {
                "Could not access to your device's motion sensors. Please, ensure you have given required permissions from your browser settings."
            }
            InitErrorKind::License => "This experience does not exist or has been unpublished.",
        }
    }
}

impl fmt::Display for InitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loading and error panels shown around initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusScreens {
    pub loading_visible: bool,
    pub error_visible: bool,
    pub error_title: String,
    pub error_message: String,
}

impl Default for StatusScreens {
    fn default() -> Self {
        Self {
            loading_visible: true,
            error_visible: false,
            error_title: String::new(),
            error_message: String::new(),
        }
    }
}

impl StatusScreens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialization succeeded.
    pub fn show_ready(&mut self) {
        self.loading_visible = false;
    }

    /// Initialization failed with the given error name.
    ///
    /// Unrecognized names still show the error panel but leave its text
    /// untouched.
    pub fn show_init_failure(&mut self, error_name: &str) {
        self.loading_visible = false;

        match InitErrorKind::from_name(error_name) {
            Some(kind) => {
                self.error_title = kind.title().to_string();
                self.error_message = kind.message().to_string();
            }
            None => tracing::warn!("Unrecognized initialization error: {}", error_name),
        }

        self.error_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_failures_set_text() {
        let expected = [
            (
                "INTERNAL_ERROR",
                "Internal Error",
                "An unespecified error has occurred. Your device might not be compatible with this experience.",
            ),
            (
                "CAMERA_ERROR",
                "Camera Error",
                "Could not access to your device's camera. Please, ensure you have given required permissions from your browser settings.",
            ),
            (
                "SENSORS_ERROR",
                "Sensors Error",
                "Could not access to your device's motion sensors. Please, ensure you have given required permissions from your browser settings.",
            ),
            (
                "LICENSE_ERROR",
                "License Error",
                "This experience does not exist or has been unpublished.",
            ),
        ];

        for (name, title, message) in expected {
            let mut screens = StatusScreens::new();
            screens.show_init_failure(name);

            assert!(!screens.loading_visible);
            assert!(screens.error_visible);
            assert_eq!(screens.error_title, title);
            assert_eq!(screens.error_message, message);
        }
    }

    #[test]
    fn test_unrecognized_failure_leaves_text() {
        let mut screens = StatusScreens::new();
        screens.error_title = "previous".to_string();
        screens.show_init_failure("NETWORK_ERROR");

        assert!(!screens.loading_visible);
        assert!(screens.error_visible);
        assert_eq!(screens.error_title, "previous");
        assert!(screens.error_message.is_empty());
    }

    #[test]
    fn test_show_ready_hides_loading_only() {
        let mut screens = StatusScreens::new();
        screens.show_ready();
        assert!(!screens.loading_visible);
        assert!(!screens.error_visible);
    }

    #[test]
    fn test_kind_lookup() {
        for kind in InitErrorKind::ALL {
            assert_eq!(InitErrorKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(InitErrorKind::from_name("camera_error"), None);
    }
}
