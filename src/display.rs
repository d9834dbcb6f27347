use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::config::{DisplayConfig, DisplayMode, PanelColor};

const BORDER_WIDTH_PX: u32 = 2;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to write frame to {path}: {source}")]
    Write {
        path: String,
        source: image::ImageError,
    },
}

/// Write-only sink for finished page bitmaps.
pub trait DisplayTarget {
    fn show(&mut self, frame: &RgbImage, border: PanelColor) -> Result<(), DisplayError>;
}

pub enum ActiveDisplayTarget {
    File(FileDisplayTarget),
    Null(NullDisplayTarget),
}

impl ActiveDisplayTarget {
    pub fn from_config(display: &DisplayConfig) -> Self {
        match display.mode {
            DisplayMode::File => Self::File(FileDisplayTarget::new(display.output_path.clone())),
            DisplayMode::Null => Self::Null(NullDisplayTarget),
        }
    }
}

impl DisplayTarget for ActiveDisplayTarget {
    fn show(&mut self, frame: &RgbImage, border: PanelColor) -> Result<(), DisplayError> {
        match self {
            ActiveDisplayTarget::File(target) => target.show(frame, border),
            ActiveDisplayTarget::Null(target) => target.show(frame, border),
        }
    }
}

/// Writes each frame as a PNG the panel driver picks up. The physical
/// refresh lives outside this process.
pub struct FileDisplayTarget {
    path: String,
}

impl FileDisplayTarget {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl DisplayTarget for FileDisplayTarget {
    fn show(&mut self, frame: &RgbImage, border: PanelColor) -> Result<(), DisplayError> {
        let mut framed = frame.clone();
        stamp_border(&mut framed, border);
        framed.save(&self.path).map_err(|source| DisplayError::Write {
            path: self.path.clone(),
            source,
        })?;
        log::info!(
            "frame_written path={} width={} height={}",
            self.path,
            framed.width(),
            framed.height()
        );
        Ok(())
    }
}

/// Discards frames; keeps headless runs and dry runs cheap.
pub struct NullDisplayTarget;

impl DisplayTarget for NullDisplayTarget {
    fn show(&mut self, frame: &RgbImage, _border: PanelColor) -> Result<(), DisplayError> {
        log::info!(
            "frame_discarded width={} height={}",
            frame.width(),
            frame.height()
        );
        Ok(())
    }
}

fn stamp_border(frame: &mut RgbImage, border: PanelColor) {
    let color = border_rgb(border);
    let (width, height) = frame.dimensions();
    for y in 0..height {
        for x in 0..width {
            if x < BORDER_WIDTH_PX
                || y < BORDER_WIDTH_PX
                || x >= width.saturating_sub(BORDER_WIDTH_PX)
                || y >= height.saturating_sub(BORDER_WIDTH_PX)
            {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

fn border_rgb(color: PanelColor) -> Rgb<u8> {
    match color {
        PanelColor::White => Rgb([255, 255, 255]),
        PanelColor::Black => Rgb([0, 0, 0]),
        PanelColor::Red => Rgb([255, 0, 0]),
    }
}

#[cfg(test)]
pub(crate) struct MockDisplayTarget {
    pub(crate) frames: Vec<(u32, u32, PanelColor)>,
}

#[cfg(test)]
impl MockDisplayTarget {
    pub(crate) fn new() -> Self {
        Self { frames: Vec::new() }
    }
}

#[cfg(test)]
impl DisplayTarget for MockDisplayTarget {
    fn show(&mut self, frame: &RgbImage, border: PanelColor) -> Result<(), DisplayError> {
        self.frames.push((frame.width(), frame.height(), border));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::{DisplayTarget, FileDisplayTarget, MockDisplayTarget, NullDisplayTarget};
    use crate::config::PanelColor;

    fn white_frame() -> RgbImage {
        RgbImage::from_pixel(40, 30, Rgb([255, 255, 255]))
    }

    #[test]
    fn file_target_writes_png_with_border() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("frame.png");
        let mut target = FileDisplayTarget::new(path.display().to_string());

        target
            .show(&white_frame(), PanelColor::Black)
            .expect("frame should be written");

        let written = image::open(&path).expect("written frame should load").to_rgb8();
        assert_eq!(written.dimensions(), (40, 30));
        assert_eq!(*written.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*written.get_pixel(39, 29), Rgb([0, 0, 0]));
        assert_eq!(*written.get_pixel(20, 15), Rgb([255, 255, 255]));
    }

    #[test]
    fn file_target_reports_unwritable_path() {
        let mut target = FileDisplayTarget::new("no/such/dir/frame.png".to_string());
        assert!(target.show(&white_frame(), PanelColor::Black).is_err());
    }

    #[test]
    fn null_target_accepts_frames() {
        let mut target = NullDisplayTarget;
        assert!(target.show(&white_frame(), PanelColor::Red).is_ok());
    }

    #[test]
    fn mock_target_records_shown_frames() {
        let mut target = MockDisplayTarget::new();
        target
            .show(&white_frame(), PanelColor::Red)
            .expect("mock always accepts");
        assert_eq!(target.frames, vec![(40, 30, PanelColor::Red)]);
    }
}
