use std::io::BufRead;
use std::path::Path;

use github_lens_common::Result;

/// one login per line; blank lines and `#` comments are skipped
pub fn read_logins_from<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut logins = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let login = line.trim();
        if login.is_empty() || login.starts_with('#') {
            continue;
        }
        logins.push(login.to_owned());
    }
    Ok(logins)
}

/// Reads logins from every file in order. Files that cannot be read are
/// logged and skipped so one bad path does not abort the whole run.
pub fn read_logins<P: AsRef<Path>>(paths: &[P]) -> Vec<String> {
    let mut logins = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("skipping input file {}: {e}", path.display());
                continue;
            }
        };
        match read_logins_from(std::io::BufReader::new(file)) {
            Ok(found) => {
                log::debug!("read {} logins from {}", found.len(), path.display());
                logins.extend(found);
            }
            Err(e) => log::warn!("skipping input file {}: {e}", path.display()),
        }
    }
    logins
}
