use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use specdoc::{
    config::Config, document::PageRange, export::export, load_document, ExportFormat, LoadOptions,
    SectionSpec,
};

#[derive(Parser)]
#[command(name = "specdoc")]
#[command(about = "Recover the structure of a specification from its text dump")]
#[command(version)]
struct Cli {
    /// Text dump to structure, pages separated by form feeds
    input: Option<PathBuf>,

    /// Pages of the table of contents (1-based, inclusive), e.g. 3-6
    #[arg(long)]
    toc: Option<PageRange>,

    /// Section to structure, as NAME=FIRST-LAST, with ":cover" appended when
    /// the first page carries a subheader and a title
    #[arg(long = "section", value_name = "NAME=FIRST-LAST[:cover]")]
    sections: Vec<SectionSpec>,

    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Config file to use instead of the one in the config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log progress at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.init_config {
        match Config::init_default()? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => bail!("No config directory available on this system"),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let Some(input) = cli.input else {
        bail!("No input file given (see --help)");
    };
    let Some(toc) = cli.toc else {
        bail!("The table of contents pages are required (--toc FIRST-LAST)");
    };
    if cli.sections.is_empty() {
        log::warn!("No --section given, only the table of contents is parsed");
    }

    let options = LoadOptions {
        toc,
        sections: cli.sections,
    };
    let document = load_document(&input, &options, &config)?;

    let format = cli.format.unwrap_or(config.output.format);
    print!("{}", export(&document, &format)?);
    Ok(())
}
