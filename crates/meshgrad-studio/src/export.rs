use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use meshgrad_editor::clipboard::{SystemClipboard, copy_css, copy_svg};
use meshgrad_editor::config::EditorConfig;
use meshgrad_editor::status::StatusCell;
use meshgrad_engine::coords::Canvas;
use meshgrad_engine::export::{Export, ExportFormat, ExportRequest, Quality};
use meshgrad_engine::field::check_geometry;

use crate::args::ExportCommand;
use crate::io::{read_gradient, write_output};

pub fn export(cmd: &ExportCommand, config: &EditorConfig) -> Result<()> {
    let gradient = read_gradient(&cmd.input)?;
    let canvas = resolve_size(cmd.width, cmd.height, config.canvas());
    let quality = cmd.quality.map(Quality::from).unwrap_or(config.quality);
    let request = ExportRequest::new(cmd.format.with_quality(quality), canvas.width, canvas.height);

    if let Err(e) = check_geometry(&gradient, canvas) {
        log::warn!("{}: {e}; exporting a solid fill", cmd.input.display());
    }

    let export = meshgrad_engine::export::export(&gradient, request)
        .with_context(|| format!("failed to export {}", cmd.input.display()))?;

    if cmd.copy {
        let mut clipboard = SystemClipboard::new();
        let mut status = StatusCell::default();
        let now = Instant::now();
        let copied = match request.format {
            ExportFormat::Svg => Some(copy_svg(&gradient, canvas, &mut clipboard, &mut status, now)),
            ExportFormat::Css => Some(copy_css(&gradient, canvas, &mut clipboard, &mut status, now)),
            ExportFormat::Png | ExportFormat::Jpeg(_) => {
                log::warn!("--copy only applies to SVG and CSS output");
                None
            }
        };
        if let Some(result) = copied {
            result.context("failed to copy to clipboard")?;
            eprintln!("copied {} to clipboard", request.format.extension());
        }
    }

    match (&export, &cmd.output) {
        (Export::Css(css), None) => {
            println!("{css}");
            Ok(())
        }
        (_, output) => {
            let path = output.clone().unwrap_or_else(|| default_filename(request.format));
            write_output(Some(&path), &export.to_bytes())?;
            eprintln!("wrote {}", path.display());
            Ok(())
        }
    }
}

/// Output size: explicit sides win; a single side keeps the configured
/// aspect ratio.
fn resolve_size(width: Option<u32>, height: Option<u32>, base: Canvas) -> Canvas {
    let scale = |side: u32, num: u32, den: u32| -> u32 {
        if den == 0 {
            return side;
        }
        (f64::from(side) * f64::from(num) / f64::from(den)).round() as u32
    };
    match (width, height) {
        (Some(w), Some(h)) => Canvas::new(w, h),
        (Some(w), None) => Canvas::new(w, scale(w, base.height, base.width)),
        (None, Some(h)) => Canvas::new(scale(h, base.width, base.height), h),
        (None, None) => base,
    }
}

/// `gradient-YYYY-MM-DD.<ext>` in the working directory, dated in UTC.
fn default_filename(format: ExportFormat) -> PathBuf {
    filename_on(format, chrono::Utc::now().date_naive())
}

fn filename_on(format: ExportFormat, date: chrono::NaiveDate) -> PathBuf {
    PathBuf::from(format!("gradient-{}.{}", date.format("%Y-%m-%d"), format.extension()))
}
