use std::io;
use std::io::ErrorKind;

use crate::content::PostMeta;

const DELIMITER: &str = "+++";

/// Splits a post into its TOML front matter and the markdown body.
///
/// ```text
/// +++
/// title = "Hello"
/// pub_date = 2024-01-05
/// +++
/// Body starts here
/// ```
pub fn split_front_matter(raw: &str) -> io::Result<(PostMeta, &str)> {
    let raw = raw.trim_start_matches('\u{feff}');
    let mut lines = raw.split_inclusive('\n');

    let first = lines.next().unwrap_or("");
    if first.trim() != DELIMITER {
        return Err(io::Error::new(ErrorKind::InvalidData, "Front matter must start with +++"));
    }

    let mut offset = first.len();
    let meta_start = offset;
    let mut meta_end = None;
    for line in lines {
        if line.trim() == DELIMITER {
            meta_end = Some(offset);
            offset += line.len();
            break;
        }
        offset += line.len();
    }

    let Some(meta_end) = meta_end else {
        return Err(io::Error::new(ErrorKind::InvalidData, "End of front matter (+++) is missing"));
    };

    let meta = match toml::from_str::<PostMeta>(&raw[meta_start..meta_end]) {
        Ok(meta) => meta,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, format!("Error parsing front matter: {}", e))),
    };

    Ok((meta, &raw[offset..]))
}
