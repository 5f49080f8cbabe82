//! Condtrack - condensation tracker demo.
//!
//! Runs a configured tracker over a synthetic clip and prints one line per
//! frame: `frame x y width height`, or `frame -` when nothing was detected.

mod scene;

use anyhow::{bail, Context, Result};
use condtrack_tracking::{ClassifierMeasurementModel, ContrastClassifier, TrackerConfig};
use scene::SyntheticClip;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

struct Args {
    config: Option<PathBuf>,
    frames: u32,
    width: u32,
    height: u32,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        frames: 100,
        width: 320,
        height: 240,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(it.next().context("--config needs a file")?.into());
            }
            "--frames" => {
                args.frames = it
                    .next()
                    .context("--frames needs a count")?
                    .parse()
                    .context("invalid frame count")?;
            }
            "--size" => {
                let size = it.next().context("--size needs WxH")?;
                let (w, h) = size.split_once('x').context("size must look like 320x240")?;
                args.width = w.parse().context("invalid width")?;
                args.height = h.parse().context("invalid height")?;
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TrackerConfig::default(),
    };

    let model = ClassifierMeasurementModel::new(ContrastClassifier::default());
    let mut tracker = config.build(Box::new(model))?;
    let clip = SyntheticClip::new(args.width, args.height);
    info!(frames = args.frames, width = args.width, height = args.height, "tracking synthetic clip");

    let mut hits = 0u32;
    for index in 0..args.frames {
        let (image, truth) = clip.frame(index);
        match tracker.process(&image)? {
            Some(rect) => {
                hits += 1;
                let error = (rect.center() - truth.center()).length();
                if error > clip.object_size as f64 {
                    warn!(frame = index, error, "estimate far from ground truth");
                }
                println!("{index} {} {} {} {}", rect.x, rect.y, rect.width, rect.height);
            }
            None => println!("{index} -"),
        }
    }

    info!(hits, frames = args.frames, "done");
    Ok(())
}
