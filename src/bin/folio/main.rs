use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use folio::locale::Locale;
use folio::logger::configure_logger;
use folio::server::server_run;

use crate::config::{generate_cfg, open_config};
use crate::new_post::new_post_cmd;

mod config;
mod config_data;
mod new_post;

const CFG_FILE_NAME: &str = "folio.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Serve the site
    Serve(ServeArgs),
    /// Write a sample configuration file
    SampleConfig(SampleConfigArgs),
    /// Create a new post skeleton
    NewPost(NewPostArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

#[derive(Parser, Debug)]
struct SampleConfigArgs {
    /// Where to write the file. Defaults to the user config directory
    #[arg(short, long)]
    out: Option<String>,
}

#[derive(Parser, Debug)]
pub(crate) struct NewPostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Language of the post (pt or en)
    #[arg(short, long, default_value_t = Locale::DEFAULT.code().to_string())]
    lang: String,

    /// Posts directory. The post lands in <out_dir>/<lang>/
    #[arg(short, long, default_value = "posts")]
    out_dir: String,
}

async fn serve_cmd(args: ServeArgs) -> Result<()> {
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run folio --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting {} =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-", config.site.title);
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await?;
    Ok(())
}

#[ntex::main]
async fn main() -> Result<()> {
    match Args::parse() {
        Args::Serve(args) => serve_cmd(args).await,
        Args::SampleConfig(args) => {
            let path = generate_cfg(&args.out.map(PathBuf::from))?;
            println!("Sample config written to {}", path.display());
            Ok(())
        }
        Args::NewPost(args) => new_post_cmd(args),
    }
}
