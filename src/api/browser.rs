// Screenshots through a headless Chromium-family browser run as a child
// process. The browser writes a PNG into a scratch directory which is read
// back and removed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use super::{CaptureOptions, Screenshotter};
use crate::config::Config;
use crate::error::ClientError;

/// Executables tried in order when `CHROME_BIN` is unset.
const CANDIDATES: [&str; 4] = ["chromium", "chromium-browser", "google-chrome", "google-chrome-stable"];

const OUTPUT_FILE: &str = "screenshot.png";

pub struct ChromiumScreenshotter {
    binary: PathBuf,
}

impl ChromiumScreenshotter {
    /// Use `CHROME_BIN`, else the first candidate found on `PATH`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let binary = match &config.chrome_bin {
            Some(bin) => bin.clone(),
            None => find_on_path(&CANDIDATES).ok_or_else(|| {
                ClientError::Browser(format!(
                    "no headless browser found (tried {}); set CHROME_BIN",
                    CANDIDATES.join(", ")
                ))
            })?,
        };
        Ok(ChromiumScreenshotter { binary })
    }
}

impl Screenshotter for ChromiumScreenshotter {
    fn capture(&self, url: &str, options: &CaptureOptions) -> Result<Vec<u8>, ClientError> {
        let scratch = tempfile::tempdir()?;
        let out = scratch.path().join(OUTPUT_FILE);
        let args = browser_args(url, &out, options);
        debug!(binary = %self.binary.display(), ?args, "launching browser");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ClientError::Browser(format!("failed to launch {}: {e}", self.binary.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClientError::Browser(format!(
                "browser exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if !out.is_file() {
            return Err(ClientError::Browser(format!("no screenshot produced for {url}")));
        }
        Ok(std::fs::read(&out)?)
    }
}

fn browser_args(url: &str, out: &Path, options: &CaptureOptions) -> Vec<String> {
    let mut args = vec![
        "--headless=new".to_string(),
        "--disable-gpu".to_string(),
        "--hide-scrollbars".to_string(),
        format!("--window-size={},{}", options.width, options.height),
        format!("--screenshot={}", out.display()),
    ];
    if let Some(wait) = options.wait {
        args.push(format!("--virtual-time-budget={}", wait.as_millis()));
    }
    args.push(url.to_string());
    args
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}
