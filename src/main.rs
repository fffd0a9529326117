use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Convert a tree of Markdown files to static HTML pages")]
struct Cli {
    /// Base path prefixed to site-absolute links (e.g. "/repo/")
    base_path: Option<String>,

    /// Config file
    #[arg(short, long, default_value = "mdsite.toml")]
    config: PathBuf,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match mdsite::Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(base_path) = cli.base_path {
        config.site.base_path = base_path;
    }
    if let Some(output) = cli.output {
        config.site.output_dir = output;
    }

    match mdsite::build_site(&config) {
        Ok(pages) => println!(
            "Generated {} pages into {}",
            pages,
            config.site.output_dir.display()
        ),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
