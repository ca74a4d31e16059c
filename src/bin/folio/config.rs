use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use folio::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir().map(|d| d.join("folio"));

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err(anyhow!("Could not find {}", CFG_FILE_NAME)),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(mut log) = config.log {
        let location = match log.location {
            Some(location) => location,
            None => dirs::cache_dir()
                .context("Could not find user cache dir for the log files")?
                .join("folio").join("log").join("server.log"),
        };
        println!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: &Option<PathBuf>) -> Result<PathBuf> {
    let path: PathBuf = match config_path {
        Some(path) => path.clone(),
        None => dirs::config_dir()
            .context("Could not find user config dir")?
            .join("folio")
            .join(CFG_FILE_NAME),
    };

    write_sample_cfg(&path)?;
    Ok(path)
}
