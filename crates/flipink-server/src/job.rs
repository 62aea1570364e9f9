//! One video render: write stills to a scratch directory and run ffmpeg over them.

use crate::config::ServerConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the encoded video inside a job directory.
const OUTPUT_FILE: &str = "output.mp4";

/// Errors from a render job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Frame {index} is not valid base64: {source}")]
    Decode {
        index: usize,
        source: base64::DecodeError,
    },
    #[error("Job IO failed: {0}")]
    Io(#[from] io::Error),
    #[error("Could not start ffmpeg: {0}")]
    Spawn(io::Error),
    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg { status: ExitStatus, stderr: String },
}

/// Decode every frame of a request, rejecting the first bad one.
pub fn decode_frames(frames: &[String]) -> Result<Vec<Vec<u8>>, JobError> {
    frames
        .iter()
        .enumerate()
        .map(|(index, data)| {
            flipink_core::export::from_data_url(data)
                .map_err(|source| JobError::Decode { index, source })
        })
        .collect()
}

/// Scratch directory for one job.
///
/// [`JobDir::remove`] deletes it without blocking the runtime. If the job is
/// dropped first (cancelled request), `Drop` deletes it synchronously.
#[derive(Debug)]
pub struct JobDir {
    path: PathBuf,
    removed: bool,
}

impl JobDir {
    pub async fn create(root: &Path) -> Result<Self, JobError> {
        let path = root.join(format!("job-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub async fn remove(mut self) {
        self.removed = true;
        log_removal(&self.path, tokio::fs::remove_dir_all(&self.path).await);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `frame-000.png`, `frame-001.png`, ...
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.path.join(format!("frame-{index:03}.png"))
    }

    /// Input pattern handed to ffmpeg; matches [`JobDir::frame_path`].
    pub fn frame_pattern(&self) -> PathBuf {
        self.path.join("frame-%03d.png")
    }

    pub fn output_path(&self) -> PathBuf {
        self.path.join(OUTPUT_FILE)
    }
}

impl Drop for JobDir {
    fn drop(&mut self) {
        if !self.removed {
            log_removal(&self.path, std::fs::remove_dir_all(&self.path));
        }
    }
}

fn log_removal(path: &Path, result: io::Result<()>) {
    match result {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}

/// Encode `frames` (PNG bytes, in order) to an H.264 MP4 at `fps`.
///
/// Dropping the returned future kills ffmpeg and removes the job directory.
pub async fn render_video(
    config: &ServerConfig,
    frames: &[Vec<u8>],
    fps: u32,
) -> Result<Vec<u8>, JobError> {
    let job = JobDir::create(&config.temp_dir).await?;
    let result = run_ffmpeg(config, &job, frames, fps).await;
    job.remove().await;
    result
}

async fn run_ffmpeg(
    config: &ServerConfig,
    job: &JobDir,
    frames: &[Vec<u8>],
    fps: u32,
) -> Result<Vec<u8>, JobError> {
    for (index, png) in frames.iter().enumerate() {
        tokio::fs::write(job.frame_path(index), png).await?;
    }
    debug!("Wrote {} frames to {}", frames.len(), job.path().display());

    let output = Command::new(&config.ffmpeg)
        .arg("-y")
        .arg("-framerate")
        .arg(fps.to_string())
        .arg("-i")
        .arg(job.frame_pattern())
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"])
        .arg(job.output_path())
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(JobError::Spawn)?;

    if !output.status.success() {
        return Err(JobError::Ffmpeg {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(tokio::fs::read(job.output_path()).await?)
}
