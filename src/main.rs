use std::path::PathBuf;

use tracing::{error, info};

use receiptgen::font::FallbackPolicy;
use receiptgen::generator;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let out_dir = std::env::var("RECEIPTGEN_OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let fallback = FallbackPolicy::from_env();

    for fixture in generator::stock_fixtures() {
        let png = match generator::generate(&fixture, fallback) {
            Ok(png) => png,
            Err(e) => {
                error!("failed to generate {}: {e}", fixture.file_name);
                std::process::exit(1);
            }
        };
        match generator::write_png(&out_dir, fixture.file_name, &png) {
            Ok(path) => info!("wrote {} ({} bytes)", path.display(), png.len()),
            Err(e) => {
                error!("failed to write {}: {e}", fixture.file_name);
                std::process::exit(1);
            }
        }
    }
}
