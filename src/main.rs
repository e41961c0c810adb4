use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use mdsite::{Config, site};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Generate a static HTML site from Markdown files")]
struct Cli {
    /// Prefix for root-relative links (overrides the config file)
    base_path: Option<String>,

    /// Site config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Directory of Markdown content
    #[arg(long)]
    content: Option<PathBuf>,

    /// HTML template with {{ Title }} and {{ Content }} placeholders
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of static assets copied into the output
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(base_path) = self.base_path {
            config.site.base_path = base_path;
        }
        if let Some(content) = self.content {
            config.paths.content = content;
        }
        if let Some(template) = self.template {
            config.paths.template = template;
        }
        if let Some(output) = self.output {
            config.paths.output = output;
        }
        if self.static_dir.is_some() {
            config.paths.static_dir = self.static_dir;
        }
        config
    }
}

fn run(config: &Config) -> mdsite::Result<usize> {
    let paths = &config.paths;

    match &paths.static_dir {
        Some(static_dir) if static_dir.is_dir() => {
            let copied = site::copy_static(static_dir, &paths.output)?;
            info!("Copied {} static files into {}", copied, paths.output.display());
        }
        Some(static_dir) => {
            info!("No static directory at {}, skipping", static_dir.display());
        }
        None => {}
    }

    let template = site::read_template(&paths.template)?;
    site::generate_pages_recursive(
        &paths.content,
        &template,
        &paths.output,
        &config.site.base_path,
    )
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let config = cli.apply(config);

    match run(&config) {
        Ok(pages) => println!("Generated {} pages in {}", pages, config.paths.output.display()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
