//! Copying SVG / CSS text to the clipboard.

use std::time::Instant;

use meshgrad_engine::coords::Canvas;
use meshgrad_engine::export::{CssOutput, to_css, to_svg};
use meshgrad_engine::model::Gradient;

use crate::error::{ClipboardError, CopyError};
use crate::status::{ExportStatus, StatusCell};

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError>;
}

/// The OS clipboard via `arboard`. Connects lazily on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);
        clipboard.set_text(text).map_err(|e| ClipboardError(e.to_string()))
    }
}

/// Keeps the last copied text; for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        self.contents = Some(text);
        Ok(())
    }
}

/// Copies the SVG document for `gradient` and records the outcome in `status`.
pub fn copy_svg(
    gradient: &Gradient,
    canvas: Canvas,
    sink: &mut dyn ClipboardSink,
    status: &mut StatusCell,
    now: Instant,
) -> Result<(), CopyError> {
    status.set(ExportStatus::InProgress, now);
    let result = to_svg(gradient, canvas.width, canvas.height)
        .map_err(CopyError::from)
        .and_then(|svg| sink.set_text(svg).map_err(CopyError::from));
    status.finish(result, now)
}

/// Copies the CSS declaration for `gradient`.
///
/// Unsupported gradients (mesh) mark the status failed and leave the
/// clipboard untouched.
pub fn copy_css(
    gradient: &Gradient,
    canvas: Canvas,
    sink: &mut dyn ClipboardSink,
    status: &mut StatusCell,
    now: Instant,
) -> Result<(), CopyError> {
    status.set(ExportStatus::InProgress, now);
    let result = match to_css(gradient, canvas) {
        CssOutput::Unsupported(comment) => Err(CopyError::Unsupported(comment)),
        css => sink.set_text(css.to_string()).map_err(CopyError::from),
    };
    status.finish(result, now)
}

#[cfg(test)]
mod tests {
    use meshgrad_engine::model::{ControlPoint, GradientType};
    use meshgrad_engine::paint::Rgb;

    use super::*;

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn set_text(&mut self, _: String) -> Result<(), ClipboardError> {
            Err(ClipboardError("no display".into()))
        }
    }

    fn gradient(kind: GradientType) -> Gradient {
        Gradient::new(
            "clip",
            kind,
            vec![
                ControlPoint::new(0.0, 0.5, Rgb::BLACK),
                ControlPoint::new(1.0, 0.5, Rgb::WHITE),
            ],
        )
    }

    #[test]
    fn css_copy_writes_declaration() {
        let now = Instant::now();
        let mut sink = MemoryClipboard::default();
        let mut status = StatusCell::default();

        copy_css(&gradient(GradientType::Linear), Canvas::new(100, 100), &mut sink, &mut status, now)
            .unwrap();
        assert_eq!(
            sink.contents.as_deref(),
            Some("background: linear-gradient(90deg, #000000 0%, #ffffff 100%);")
        );
        assert_eq!(status.get(now), ExportStatus::Succeeded);
    }

    #[test]
    fn mesh_css_copy_fails_without_touching_clipboard() {
        let now = Instant::now();
        let mut sink = MemoryClipboard { contents: Some("previous".into()) };
        let mut status = StatusCell::default();

        let err = copy_css(&gradient(GradientType::Mesh), Canvas::new(10, 10), &mut sink, &mut status, now)
            .unwrap_err();
        assert!(matches!(err, CopyError::Unsupported(_)));
        assert_eq!(sink.contents.as_deref(), Some("previous"));
        assert_eq!(status.get(now), ExportStatus::Failed);
    }

    #[test]
    fn svg_copy_reports_clipboard_failure() {
        let now = Instant::now();
        let mut status = StatusCell::default();
        let err = copy_svg(
            &gradient(GradientType::Radial),
            Canvas::new(10, 10),
            &mut BrokenClipboard,
            &mut status,
            now,
        )
        .unwrap_err();
        assert!(matches!(err, CopyError::Clipboard(_)));
        assert_eq!(status.get(now), ExportStatus::Failed);
    }

    #[test]
    fn svg_copy_writes_document() {
        let now = Instant::now();
        let mut sink = MemoryClipboard::default();
        let mut status = StatusCell::default();
        copy_svg(&gradient(GradientType::Mesh), Canvas::new(8, 8), &mut sink, &mut status, now).unwrap();
        assert!(sink.contents.unwrap().contains("data:image/png;base64,"));
    }
}
