use async_trait::async_trait;
use questube_core::{MediaInfo, MediaResolver, ResolveError, SourceUrl};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Upper bound on one resolver invocation. A hung extractor otherwise
/// blocks its request forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Adapter around the yt-dlp executable.
///
/// One resolution is one short-lived child process: `yt-dlp
/// --add-header Name:Value ... -J <url>`, with the media document read
/// from stdout. The adapter itself never caches and never retries.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    program: PathBuf,
    timeout: Duration,
}

impl YtDlpResolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self::with_timeout(program, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn resolve(
        &self,
        url: &SourceUrl,
        headers: &[(String, String)],
    ) -> Result<MediaInfo, ResolveError> {
        let mut args: Vec<String> = Vec::with_capacity(headers.len() * 2 + 2);
        for (name, value) in headers {
            args.push("--add-header".to_owned());
            args.push(format!("{name}:{value}"));
        }
        args.push("-J".to_owned());
        args.push(url.as_str().to_owned());

        debug!(url = %url, program = %self.program.display(), "invoking resolver");

        let output = timeout(
            self.timeout,
            Command::new(&self.program)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| ResolveError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| ResolveError::Launch(e.to_string()))?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            let stderr = last_nonempty_line(&output.stderr);
            warn!(url = %url, status, stderr = %stderr, "resolver exited with failure");
            return Err(ResolveError::Failed { status, stderr });
        }

        parse_media_info(&output.stdout)
    }
}

/// Parses the resolver's stdout as a media document.
pub fn parse_media_info(stdout: &[u8]) -> Result<MediaInfo, ResolveError> {
    serde_json::from_slice(stdout).map_err(|e| ResolveError::InvalidOutput(e.to_string()))
}

fn last_nonempty_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default()
        .trim()
        .to_owned()
}
