//! FFmpeg transcoder
//!
//! Converts whatever a provider returned into the canonical waveform (mono,
//! 16 kHz, signed 16-bit PCM, WAV). Input and output are staged as uniquely
//! named files in the work directory and removed by drop guards on every
//! exit path, including timeouts.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use crate::config::TranscoderConfig;
use crate::error::SpeechError;
use crate::ports::AudioTranscoder;
use crate::types::{CanonicalWaveform, EncodedAudio};

/// Prefix of staged provider audio
pub const INPUT_PREFIX: &str = "tts-in-";

/// Prefix of transcoder output files
pub const OUTPUT_PREFIX: &str = "tts-out-";

/// Longest stderr excerpt kept in an error message
const MAX_STDERR_LEN: usize = 400;

/// Temp file deleted when the guard goes out of scope
///
/// Deletion failures are logged at debug and never surface to the caller.
struct StagedFile(Option<NamedTempFile>);

impl StagedFile {
    fn create(dir: &Path, prefix: &str, extension: &str) -> Result<Self, SpeechError> {
        let suffix = format!(".{extension}");
        tempfile::Builder::new()
            .prefix(prefix)
            .suffix(&suffix)
            .tempfile_in(dir)
            .map(|file| Self(Some(file)))
            .map_err(|e| {
                SpeechError::Transcode(format!(
                    "Failed to create staging file in {}: {e}",
                    dir.display()
                ))
            })
    }

    fn path(&self) -> &Path {
        self.0.as_ref().map_or_else(|| Path::new(""), NamedTempFile::path)
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Some(file) = self.0.take() {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                debug!(path = %path.display(), "Failed to remove staging file: {e}");
            }
        }
    }
}

/// Audio transcoder backed by an external FFmpeg process
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
    work_dir: PathBuf,
    timeout: Duration,
}

impl FfmpegTranscoder {
    /// Create a transcoder from configuration
    #[must_use]
    pub fn new(config: &TranscoderConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            work_dir: config.work_dir(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// FFmpeg binary path
    #[must_use]
    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }

    /// Directory staging files are created in
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Deterministic argument list: drop video, mono, 16 kHz, PCM16, WAV
    #[must_use]
    pub fn ffmpeg_args(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_owned());
        args.extend(
            [
                "-vn",
                "-ac",
                "1",
                "-ar",
                "16000",
                "-c:a",
                "pcm_s16le",
                "-f",
                "wav",
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_owned());
        args
    }

    async fn run(&self, audio: &EncodedAudio) -> Result<CanonicalWaveform, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::Transcode("Encoded audio is empty".to_string()));
        }

        let input = StagedFile::create(&self.work_dir, INPUT_PREFIX, audio.format().extension())?;
        let output = StagedFile::create(&self.work_dir, OUTPUT_PREFIX, "wav")?;

        tokio::fs::write(input.path(), audio.data())
            .await
            .map_err(|e| SpeechError::Transcode(format!("Failed to stage input audio: {e}")))?;

        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.args(Self::ffmpeg_args(input.path(), output.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                SpeechError::Transcode(format!(
                    "ffmpeg timed out after {}ms",
                    self.timeout.as_millis()
                ))
            })?
            .map_err(|e| SpeechError::Transcode(format!("Failed to start ffmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr: String = stderr.trim().chars().take(MAX_STDERR_LEN).collect();
            return Err(SpeechError::Transcode(format!(
                "ffmpeg exited with {}: {stderr}",
                result.status
            )));
        }

        let wav = tokio::fs::read(output.path())
            .await
            .map_err(|e| SpeechError::Transcode(format!("Failed to read ffmpeg output: {e}")))?;

        if wav.is_empty() {
            return Err(SpeechError::Transcode(
                "ffmpeg produced empty output".to_string(),
            ));
        }

        CanonicalWaveform::from_wav_bytes(wav)
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    #[instrument(skip(self, audio), fields(
        provider = %audio.provider(),
        input_format = %audio.format(),
        input_size = audio.size_bytes()
    ))]
    async fn transcode(&self, audio: &EncodedAudio) -> Result<CanonicalWaveform, SpeechError> {
        match self.run(audio).await {
            Ok(waveform) => {
                debug!(
                    output_size = waveform.size_bytes(),
                    duration_ms = waveform.duration_ms(),
                    "Transcoding complete"
                );
                Ok(waveform)
            },
            Err(e) => {
                error!("Transcoding failed: {e}");
                Err(e)
            },
        }
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .is_ok_and(|status| status.success())
    }
}
