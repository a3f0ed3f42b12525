//! `scanlink sign`: render recorded strokes to a PNG data URL.

use scanlink_common::ScanlinkError;
use scanlink_config::ScanlinkConfig;
use scanlink_signature::{parse_strokes, replay_strokes, SignatureError, SignaturePad};
use tracing::info;

use crate::cli::SignArgs;
use crate::settings;

pub fn run(args: SignArgs, config: &ScanlinkConfig) -> Result<(), ScanlinkError> {
    let json = std::fs::read_to_string(&args.strokes)?;
    let data_url = render(&json, args.width, config).map_err(|e| ScanlinkError::Signature(e.to_string()))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &data_url)?;
            info!(path = %path.display(), bytes = data_url.len(), "Signature written");
        }
        None => println!("{data_url}"),
    }
    Ok(())
}

fn render(json: &str, width: f64, config: &ScanlinkConfig) -> Result<String, SignatureError> {
    let strokes = parse_strokes(json)?;
    let style = settings::stroke_style(&config.signature)?;
    let mut pad = SignaturePad::new(width, config.signature.height, style);
    replay_strokes(&mut pad, &strokes)
}
