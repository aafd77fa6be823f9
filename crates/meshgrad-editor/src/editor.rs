//! [`Editor`]: session, preview and export feedback wired together.

use std::time::Instant;

use meshgrad_engine::error::ExportError;
use meshgrad_engine::export::{Export, ExportFormat, ExportRequest, export};

use crate::clipboard::{ClipboardSink, copy_css, copy_svg};
use crate::config::EditorConfig;
use crate::error::CopyError;
use crate::preview::Preview;
use crate::session::Session;
use crate::status::{ExportStatus, StatusCell};

pub struct Editor {
    pub config: EditorConfig,
    pub session: Session,
    pub preview: Preview,
    clipboard: Box<dyn ClipboardSink>,
    export_status: StatusCell,
    svg_status: StatusCell,
    css_status: StatusCell,
}

impl Editor {
    pub fn new(config: EditorConfig, rng: fastrand::Rng, clipboard: Box<dyn ClipboardSink>) -> Self {
        let saved = crate::store::SavedGradients::open(config.store());
        let preview = Preview::new(config.canvas(), config.frame_interval());
        Self {
            session: Session::new(saved, rng),
            preview,
            clipboard,
            export_status: StatusCell::default(),
            svg_status: StatusCell::default(),
            css_status: StatusCell::default(),
            config,
        }
    }

    /// Exports the working gradient. Quality in `request` wins; callers that
    /// want the configured default use [`Editor::request`].
    pub fn export(&mut self, request: ExportRequest, now: Instant) -> Result<Export, ExportError> {
        self.export_status.set(ExportStatus::InProgress, now);
        let result = export(self.session.gradient(), request);
        self.export_status.finish(result, now)
    }

    /// Request at the configured canvas size and quality.
    pub fn request(&self, format: ExportFormat) -> ExportRequest {
        let format = match format {
            ExportFormat::Jpeg(_) => ExportFormat::Jpeg(self.config.quality),
            other => other,
        };
        ExportRequest::new(format, self.config.canvas_width, self.config.canvas_height)
    }

    pub fn copy_svg(&mut self, now: Instant) -> Result<(), CopyError> {
        copy_svg(
            self.session.gradient(),
            self.preview.canvas(),
            self.clipboard.as_mut(),
            &mut self.svg_status,
            now,
        )
    }

    pub fn copy_css(&mut self, now: Instant) -> Result<(), CopyError> {
        copy_css(
            self.session.gradient(),
            self.preview.canvas(),
            self.clipboard.as_mut(),
            &mut self.css_status,
            now,
        )
    }

    pub fn export_status(&self, now: Instant) -> ExportStatus {
        self.export_status.get(now)
    }

    pub fn svg_status(&self, now: Instant) -> ExportStatus {
        self.svg_status.get(now)
    }

    pub fn css_status(&self, now: Instant) -> ExportStatus {
        self.css_status.get(now)
    }
}
