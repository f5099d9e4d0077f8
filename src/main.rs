// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wonder_lens::app::{self, Flags};

const HELP: &str = "\
WonderLens - memory gallery

USAGE:
  wonder_lens [OPTIONS]

OPTIONS:
  -h, --help               Print this help
  --lang <LANG>            Interface language (en-US, fr)
  --config-dir <DIR>       Directory holding settings.toml
  --catalog <FILE>         Album to show instead of the built-in one
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wonder_lens=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang: Option<String> = args.opt_value_from_str("--lang")?;
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir")?;
    let catalog: Option<PathBuf> = args.opt_value_from_str("--catalog")?;

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unknown arguments");
    }

    let (album, album_warning) = app::resolve_album(catalog.as_deref())?;

    app::run(Flags {
        lang,
        config_dir,
        album,
        album_warning,
    })?;
    Ok(())
}
