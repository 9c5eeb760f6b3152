//! Renders one frame of an empty scene and writes it to a PNG file.
//!
//! ```text
//! vista-studio [--verbose] [--gpu] [--coloring] [--no-background] [--size WxH]
//!              [--up DIR] [--background R,G,B] [OUTPUT]
//! ```

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use vista_engine::Window;
use vista_engine::backend::{GpuBackend, GpuInit, HeadlessBackend};
use vista_engine::engine::{Backend, WindowType};
use vista_engine::logging::{self, LoggingConfig, VerboseLevel};
use vista_engine::options::Options;

#[derive(Debug, Parser)]
#[command(version, about = "Render one frame of an empty scene to a PNG file")]
struct Args {
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Render through wgpu instead of the headless backend.
    #[arg(long)]
    gpu: bool,

    /// Use the renderer able to color by data.
    #[arg(long)]
    coloring: bool,

    /// Capture with a transparent background.
    #[arg(long)]
    no_background: bool,

    /// Window size as WxH.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Up direction, e.g. +Z.
    #[arg(long, value_name = "DIR", allow_hyphen_values = true)]
    up: Option<String>,

    /// Background color as R,G,B in [0, 1].
    #[arg(long, value_name = "R,G,B", value_parser = parse_color)]
    background: Option<[f64; 3]>,

    #[arg(default_value = "vista.png")]
    output: PathBuf,
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let invalid = || format!("invalid size {value:?}, expected WxH");
    let (w, h) = value.split_once('x').ok_or_else(invalid)?;
    Ok((
        w.parse().map_err(|_| invalid())?,
        h.parse().map_err(|_| invalid())?,
    ))
}

fn parse_color(value: &str) -> Result<[f64; 3], String> {
    let invalid = || format!("invalid color {value:?}, expected R,G,B");
    let color = value
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    color.try_into().map_err(|_| invalid())
}

fn backend(gpu: bool) -> Box<dyn Backend> {
    if !gpu {
        return Box::new(HeadlessBackend);
    }
    match GpuBackend::new(GpuInit::offscreen()) {
        Ok(backend) => Box::new(backend),
        Err(err) => {
            log::warn!("GPU unavailable ({err:#}), falling back to headless rendering");
            Box::new(HeadlessBackend)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(LoggingConfig::with_verbose(if args.verbose {
        VerboseLevel::Debug
    } else {
        VerboseLevel::Info
    }));

    let mut options = Options::default();
    if let Some(up) = &args.up {
        options.set("scene.up-direction", up.as_str())?;
    }
    if let Some(color) = args.background {
        options.set("render.background.color", color.to_vec())?;
    }

    let mut window = Window::new(Rc::new(options), WindowType::None, backend(args.gpu))?;
    window.set_window_name("vista");
    if let Some((width, height)) = args.size {
        window.set_size(width, height);
    }

    window.initialize(args.coloring)?;
    window.print_scene_description(VerboseLevel::Debug);
    window.print_coloring_description(VerboseLevel::Info);

    let image = window.render_to_image(args.no_background)?;
    let dynamic = image
        .to_dynamic()
        .with_context(|| format!("cannot encode {}-channel image", image.channels()))?;
    dynamic
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size() {
        assert_eq!(parse_size("640x480").unwrap(), (640, 480));
        assert!(parse_size("640").is_err());
    }

    #[test]
    fn parses_color() {
        assert_eq!(parse_color("1, 0.5, 0").unwrap(), [1.0, 0.5, 0.0]);
        assert!(parse_color("1,0").is_err());
        assert!(parse_color("red").is_err());
    }

    #[test]
    fn parses_command_line() {
        let args = Args::try_parse_from([
            "vista-studio",
            "--coloring",
            "--size",
            "640x480",
            "--up",
            "-Z",
            "--background",
            "0,0,1",
            "frame.png",
        ])
        .unwrap();
        assert!(args.coloring && !args.gpu && !args.no_background);
        assert_eq!(args.size, Some((640, 480)));
        assert_eq!(args.up.as_deref(), Some("-Z"));
        assert_eq!(args.background, Some([0.0, 0.0, 1.0]));
        assert_eq!(args.output, PathBuf::from("frame.png"));
    }

    #[test]
    fn output_defaults_and_bad_values_are_rejected() {
        let args = Args::try_parse_from(["vista-studio"]).unwrap();
        assert_eq!(args.output, PathBuf::from("vista.png"));
        assert!(Args::try_parse_from(["vista-studio", "--size", "640"]).is_err());
        assert!(Args::try_parse_from(["vista-studio", "--frobnicate"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
