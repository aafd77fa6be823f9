use anyhow::Result;
use meshgrad_engine::paint::hex_to_rgb;

use crate::args::ColorCommand;

pub fn color(cmd: &ColorCommand) -> Result<()> {
    let rgb = hex_to_rgb(cmd.value.trim())?;
    let hsv = rgb.to_hsv();
    println!("hex  {rgb}");
    println!("rgb  rgb({}, {}, {})", rgb.r, rgb.g, rgb.b);
    println!("hsv  {hsv}");
    println!("hsl  {}", hsv.to_hsl());
    Ok(())
}
