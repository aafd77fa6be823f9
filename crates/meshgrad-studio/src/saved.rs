use anyhow::{Context, Result};
use meshgrad_editor::config::EditorConfig;
use meshgrad_editor::store::SavedGradients;
use meshgrad_engine::model::{Gradient, timestamp_id};

use crate::args::SavedCommand;
use crate::io::read_gradient;

pub fn saved(cmd: &SavedCommand, config: &EditorConfig) -> Result<()> {
    let mut saved = SavedGradients::open(config.store());

    match cmd {
        SavedCommand::List => {
            if saved.is_empty() {
                eprintln!("no saved gradients in {}", saved.store().path().display());
            }
            for g in saved.list() {
                println!("{}", describe(g));
            }
        }
        SavedCommand::Save(args) => {
            let gradient = read_gradient(&args.file)?;
            let id = saved
                .push(Gradient { id: timestamp_id(), ..gradient })
                .context("failed to save gradient")?;
            println!("{id}");
        }
        SavedCommand::Delete(args) => {
            saved.remove(&args.id)?;
            eprintln!("deleted {}", args.id);
        }
        SavedCommand::Show(args) => {
            let gradient = saved
                .get(&args.id)
                .with_context(|| format!("no saved gradient with id {:?}", args.id))?;
            println!("{}", serde_json::to_string_pretty(gradient)?);
        }
    }
    Ok(())
}

/// One `list` line: id, save time (ids are Unix milliseconds), type, points.
fn describe(g: &Gradient) -> String {
    let saved_at = g
        .id
        .parse::<i64>()
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into());
    format!("{:<15} {saved_at:<16} {:<6} {} points", g.id, g.kind, g.points.len())
}

#[cfg(test)]
mod tests {
    use meshgrad_engine::model::{ControlPoint, GradientType};
    use meshgrad_engine::paint::Rgb;

    use super::*;

    #[test]
    fn describes_entries() {
        let g = Gradient::new(
            "not-a-time",
            GradientType::Radial,
            vec![ControlPoint::new(0.5, 0.5, Rgb::WHITE); 3],
        );
        let line = describe(&g);
        assert!(line.starts_with("not-a-time"));
        assert!(line.contains(" - "));
        assert!(line.ends_with("radial 3 points"));
    }
}
