//! Photo-of-the-day selection
//!
//! Capture images are named `<date>_<HHMM>.jpg`, e.g. `2026-02-01_1142.jpg`.
//! The segment after the first `_` carries the capture time: exactly four
//! ASCII digits (hour then minute) followed by a lowercase `.jpg` suffix.
//! Hour and minute ranges are not checked, so `9960` reads as 99:60.

use drive_client::{ChildQuery, EntryKind, HierarchyClient};
use thiserror::Error;
use tracing::debug;
use witness_common::{ContainerRef, Result};

/// Target time of day in minutes (12:00)
pub const MIDDAY_MINUTES: u32 = 12 * 60;

const CAPTURE_EXTENSION: &str = ".jpg";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptureNameError {
    #[error("no '_' separator before the capture time")]
    MissingSeparator,

    #[error("capture time segment does not end in .jpg")]
    MissingExtension,

    #[error("capture time '{0}' is not four digits")]
    BadTime(String),
}

/// The capture time encoded in an image file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureName {
    pub hour: u32,
    pub minute: u32,
}

impl CaptureName {
    pub fn parse(name: &str) -> std::result::Result<Self, CaptureNameError> {
        let segment = name
            .split('_')
            .nth(1)
            .ok_or(CaptureNameError::MissingSeparator)?;

        let stem = segment
            .strip_suffix(CAPTURE_EXTENSION)
            .ok_or(CaptureNameError::MissingExtension)?;

        if stem.len() != 4 || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CaptureNameError::BadTime(stem.to_string()));
        }

        let (hour, minute) = stem.split_at(2);
        let hour = hour
            .parse()
            .map_err(|_| CaptureNameError::BadTime(stem.to_string()))?;
        let minute = minute
            .parse()
            .map_err(|_| CaptureNameError::BadTime(stem.to_string()))?;

        Ok(Self { hour, minute })
    }

    pub fn minutes_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Absolute distance from 12:00 in minutes
    pub fn distance_from_midday(&self) -> u32 {
        self.minutes_of_day().abs_diff(MIDDAY_MINUTES)
    }
}

/// Pick the image captured closest to midday
///
/// Names that do not parse are skipped. On equal distance the earlier entry
/// in listing order is kept.
pub fn select_nearest_to_midday(images: &[ContainerRef]) -> Option<&ContainerRef> {
    let mut best: Option<(&ContainerRef, u32)> = None;

    for image in images {
        let capture = match CaptureName::parse(&image.name) {
            Ok(capture) => capture,
            Err(e) => {
                debug!("Skipping image '{}': {}", image.name, e);
                continue;
            }
        };

        let distance = capture.distance_from_midday();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((image, distance)),
        }
    }

    best.map(|(image, _)| image)
}

/// List the image files inside a resolved date folder
pub async fn list_images(
    client: &dyn HierarchyClient,
    date_folder: &ContainerRef,
) -> Result<Vec<ContainerRef>> {
    let query = ChildQuery::children_of(date_folder.id.clone()).of_kind(EntryKind::Image);
    client.list_children(&query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(names: &[&str]) -> Vec<ContainerRef> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ContainerRef::new(format!("id-{}", i), *name))
            .collect()
    }

    #[test]
    fn test_parse_capture_name() {
        let capture = CaptureName::parse("2026-02-01_1142.jpg").unwrap();
        assert_eq!(capture, CaptureName { hour: 11, minute: 42 });
        assert_eq!(capture.minutes_of_day(), 702);
        assert_eq!(capture.distance_from_midday(), 18);
    }

    #[test]
    fn test_parse_failures_are_typed() {
        assert_eq!(
            CaptureName::parse("bad.jpg"),
            Err(CaptureNameError::MissingSeparator)
        );
        assert_eq!(
            CaptureName::parse("shot_1230.png"),
            Err(CaptureNameError::MissingExtension)
        );
        assert_eq!(
            CaptureName::parse("shot_12a0.jpg"),
            Err(CaptureNameError::BadTime("12a0".to_string()))
        );
        assert_eq!(
            CaptureName::parse("shot_123.jpg"),
            Err(CaptureNameError::BadTime("123".to_string()))
        );
        assert_eq!(
            CaptureName::parse("shot_+123.jpg"),
            Err(CaptureNameError::BadTime("+123".to_string()))
        );
    }

    #[test]
    fn test_time_segment_is_second_field() {
        // Third field is never consulted
        assert!(CaptureName::parse("site_north_1200.jpg").is_err());
        assert!(CaptureName::parse("2026-02-01_1200.jpg_copy").is_ok());
    }

    #[test]
    fn test_ranges_not_validated() {
        let capture = CaptureName::parse("x_9960.jpg").unwrap();
        assert_eq!(capture.minutes_of_day(), 99 * 60 + 60);
    }

    #[test]
    fn test_selects_closest_to_midday() {
        let listing = images(&["a_0800.jpg", "b_1150.jpg", "c_1215.jpg", "d_1900.jpg"]);
        let selected = select_nearest_to_midday(&listing).unwrap();
        assert_eq!(selected.name, "b_1150.jpg");
    }

    #[test]
    fn test_before_and_after_midday_are_symmetric() {
        let listing = images(&["a_1310.jpg", "b_1045.jpg", "c_1250.jpg"]);
        let selected = select_nearest_to_midday(&listing).unwrap();
        assert_eq!(selected.name, "c_1250.jpg");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let listing = images(&["x_1200.jpg", "y_1200.jpg"]);
        assert_eq!(select_nearest_to_midday(&listing).unwrap().name, "x_1200.jpg");

        let listing = images(&["late_1230.jpg", "early_1130.jpg"]);
        assert_eq!(select_nearest_to_midday(&listing).unwrap().name, "late_1230.jpg");
    }

    #[test]
    fn test_malformed_names_are_skipped() {
        let listing = images(&["bad.jpg", "shot_1230.jpg"]);
        let selected = select_nearest_to_midday(&listing).unwrap();
        assert_eq!(selected.name, "shot_1230.jpg");
        assert_eq!(selected.id, "id-1");
    }

    #[test]
    fn test_no_candidates() {
        assert!(select_nearest_to_midday(&[]).is_none());
        assert!(select_nearest_to_midday(&images(&["bad.jpg", "x_noon.jpg"])).is_none());
    }
}
