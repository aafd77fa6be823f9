use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use meshgrad_engine::model::Gradient;

/// Reads a gradient JSON file, or stdin for `-`.
pub fn read_gradient(path: &Path) -> Result<Gradient> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("{} is not a gradient", path.display()))
}

/// Writes `bytes` to `path`, or stdout when there is no path.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(bytes).context("failed to write stdout")?;
            out.flush().context("failed to write stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use meshgrad_engine::model::{ControlPoint, GradientType};
    use meshgrad_engine::paint::Rgb;

    use super::*;

    #[test]
    fn reads_written_gradient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.json");
        let g = Gradient::new(
            "1",
            GradientType::Conic,
            vec![ControlPoint::new(0.5, 0.5, Rgb::new(9, 8, 7))],
        );
        write_output(Some(&path), serde_json::to_string(&g).unwrap().as_bytes()).unwrap();
        assert_eq!(read_gradient(&path).unwrap(), g);
    }

    #[test]
    fn rejects_non_gradient_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"id": 3}"#).unwrap();
        assert!(read_gradient(&path).is_err());
    }
}
