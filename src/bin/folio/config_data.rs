use std::fs;
use std::io;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
title = "Azagatti"
url = "https://azagatti.dev"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/template"
public_dir = "res/public"
# Posts go in <posts_dir>/pt/ and <posts_dir>/en/
posts_dir = "posts"

[defaults]
page_size = 9
words_per_minute = 200
summary_tag = "<!-- more -->"

[theme]
storage_key = "azagatti:theme"

[server]
address = "0.0.0.0"
port = 8001

# Remove this section to log to the console only
[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, CONFIG_SAMPLE)
}
