use anyhow::Result;
use clap::Parser;
use std::path::Path;

use waterer_icons::icon_gen::{self, OUTPUT_DIR};

#[derive(Debug, Parser)]
#[clap(
    name = "waterer-icons",
    version,
    about = "Generate the Waterer extension icons (16, 48 and 128 px) into ./icons"
)]
struct Args {}

fn main() -> Result<()> {
    Args::parse();

    icon_gen::generate_icons(Path::new(OUTPUT_DIR))
}
