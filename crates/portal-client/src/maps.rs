//! "View on Google Maps" button.

use tracing::debug;

/// Label used when none is given.
pub const DEFAULT_LABEL: &str = "View on Google Maps";

const MAPS_URL: &str = "https://www.google.com/maps";

/// Opens URLs in a new browsing context, without giving the opened page a
/// handle back to the opener.
pub trait Opener: Send + Sync {
    fn open(&self, url: &str);
}

/// What the button should point at. Coordinates win over the address when
/// both are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapTarget {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub label: Option<String>,
}

impl MapTarget {
    pub fn coordinates(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            ..Self::default()
        }
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The maps URL, or `None` when there is nothing to point at.
    pub fn href(&self) -> Option<String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(format!("{MAPS_URL}?q={lat},{lng}"))
            }
            _ => self
                .address
                .as_deref()
                .filter(|a| !a.is_empty())
                .map(|a| format!("{MAPS_URL}?q={}", urlencoding::encode(a))),
        }
    }
}

/// A rendered map button. Only exists when its target resolves to a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapButton {
    href: String,
    label: String,
}

impl MapButton {
    /// Render a button for `target`, or nothing if it has no location.
    pub fn new(target: &MapTarget) -> Option<Self> {
        let href = target.href()?;
        Some(Self {
            href,
            label: target
                .label
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL.to_owned()),
        })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn click(&self, opener: &dyn Opener) {
        debug!(href = %self.href, "opening map");
        opener.open(&self.href);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener(Mutex<Vec<String>>);

    impl Opener for RecordingOpener {
        fn open(&self, url: &str) {
            self.0.lock().unwrap().push(url.to_owned());
        }
    }

    #[test]
    fn coordinates_open_lat_lng_query() {
        let button = MapButton::new(&MapTarget::coordinates(26.2, 91.7)).unwrap();
        let opener = RecordingOpener::default();
        button.click(&opener);
        assert_eq!(
            *opener.0.lock().unwrap(),
            ["https://www.google.com/maps?q=26.2,91.7"]
        );
        assert_eq!(button.label(), "View on Google Maps");
    }

    #[test]
    fn coordinates_take_precedence_over_address() {
        let target = MapTarget {
            address: Some("Guwahati".to_owned()),
            ..MapTarget::coordinates(26.2, 91.7)
        };
        assert_eq!(
            target.href().as_deref(),
            Some("https://www.google.com/maps?q=26.2,91.7")
        );
    }

    #[test]
    fn address_is_percent_encoded() {
        let button = MapButton::new(&MapTarget::address("Dispur, Guwahati & Assam")).unwrap();
        assert_eq!(
            button.href(),
            "https://www.google.com/maps?q=Dispur%2C%20Guwahati%20%26%20Assam"
        );
    }

    #[test]
    fn half_coordinates_fall_back_to_address() {
        let target = MapTarget {
            lat: Some(26.2),
            ..MapTarget::address("Shillong")
        };
        assert_eq!(
            target.href().as_deref(),
            Some("https://www.google.com/maps?q=Shillong")
        );
    }

    #[test]
    fn nothing_renders_no_button() {
        assert_eq!(MapButton::new(&MapTarget::default()), None);
        assert_eq!(MapButton::new(&MapTarget::address("")), None);
        assert_eq!(MapButton::new(&MapTarget::coordinates(f64::NAN, 91.7)), None);
    }

    #[test]
    fn custom_label() {
        let button =
            MapButton::new(&MapTarget::coordinates(25.57, 91.88).with_label("Project site")).unwrap();
        assert_eq!(button.label(), "Project site");
        assert_eq!(button.href(), "https://www.google.com/maps?q=25.57,91.88");
    }
}
