use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::reading_time::DEFAULT_WORDS_PER_MINUTE;
use crate::theme::DEFAULT_STORAGE_KEY;

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub url: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub posts_dir: PathBuf,
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

fn default_summary_tag() -> String {
    "<!-- more -->".to_string()
}

#[derive(Deserialize)]
pub struct Defaults {
    pub page_size: u32,
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    #[serde(default = "default_summary_tag")]
    pub summary_tag: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[derive(Deserialize)]
pub struct ThemeCfg {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for ThemeCfg {
    fn default() -> Self {
        ThemeCfg { storage_key: default_storage_key() }
    }
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    #[serde(default)]
    pub theme: ThemeCfg,
    pub server: Server,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf, exe_dir: &Path) -> PathBuf {
    match path.to_str() {
        Some(str_path) if str_path.starts_with("${exe_dir}") => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str, exe_dir: &Path) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir, exe_dir),
        public_dir: parse_path(cfg.paths.public_dir, exe_dir),
        posts_dir: parse_path(cfg.paths.posts_dir, exe_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    parse_config(&cfg_content, exe_dir)
}
