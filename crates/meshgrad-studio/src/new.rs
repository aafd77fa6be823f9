use anyhow::{Result, bail};
use meshgrad_engine::model::{GradientType, random_gradient};

use crate::args::NewCommand;
use crate::io::write_output;

pub fn new(cmd: &NewCommand) -> Result<()> {
    if cmd.points == 0 {
        bail!("a gradient needs at least one point");
    }

    let kind = GradientType::from(cmd.kind);
    let mut rng = cmd.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let gradient = random_gradient(&mut rng, cmd.points).with_kind(kind);
    if gradient.points.len() < gradient.min_points() {
        log::warn!("a {kind} gradient with {} point(s) renders as a solid fill", cmd.points);
    }

    let mut json = serde_json::to_string_pretty(&gradient)?;
    json.push('\n');
    write_output(cmd.output.as_deref(), json.as_bytes())
}
