use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::{Decode, PcmClip, PlaybackError};

/// Output format: 16-bit signed little-endian PCM, 48 kHz, stereo.
pub const FFMPEG_ARGS: [&str; 11] = [
    "-i", "-", "-f", "s16le", "-ar", "48000", "-ac", "2", "-loglevel", "warning", "pipe:1",
];

/// Runs `ffmpeg` once per clip, feeding it the encoded bytes on stdin.
#[derive(Clone, Debug)]
pub struct Transcoder {
    program: String,
}

impl Transcoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn spawn(&self) -> Result<Child, PlaybackError> {
        Command::new(&self.program)
            .args(FFMPEG_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PlaybackError::TranscoderLaunch {
                program: self.program.clone(),
                source,
            })
    }
}

#[async_trait]
impl Decode for Transcoder {
    async fn decode(&self, encoded: Vec<u8>) -> Result<PcmClip, PlaybackError> {
        let mut child = self.spawn()?;
        let result = run(&mut child, encoded).await;

        // Kill then reap on every path. The kill fails harmlessly when ffmpeg
        // already exited on its own.
        let _ = child.start_kill();
        let status = child
            .wait()
            .await
            .map_err(|e| PlaybackError::Transcode(format!("could not reap ffmpeg: {e}")))?;

        let pcm = result?;
        debug!("ffmpeg exited with {status}, {} bytes of pcm", pcm.len());

        let clip = PcmClip::from_s16le(pcm);
        if clip.is_empty() {
            return Err(PlaybackError::Transcode(format!(
                "ffmpeg produced no audio ({status})"
            )));
        }
        Ok(clip)
    }
}

async fn run(child: &mut Child, encoded: Vec<u8>) -> Result<Vec<u8>, PlaybackError> {
    let pipe_missing = |name: &str| PlaybackError::Transcode(format!("ffmpeg {name} not piped"));
    let mut stdin = child.stdin.take().ok_or_else(|| pipe_missing("stdin"))?;
    let mut stdout = child.stdout.take().ok_or_else(|| pipe_missing("stdout"))?;
    let mut stderr = child.stderr.take().ok_or_else(|| pipe_missing("stderr"))?;

    // stdin moves into the future and is dropped with it, so ffmpeg sees EOF
    let write = async move { stdin.write_all(&encoded).await };
    let read = async {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await.map(|_| buf)
    };
    let log = async {
        let mut buf = String::new();
        let _ = stderr.read_to_string(&mut buf).await;
        buf
    };

    let (written, pcm, messages) = tokio::join!(write, read, log);

    for line in messages.lines().filter(|l| !l.trim().is_empty()) {
        warn!("ffmpeg: {line}");
    }
    if let Err(e) = written {
        // ffmpeg may stop reading early on a bad stream; the output check
        // decides whether that mattered.
        debug!("ffmpeg stdin closed early: {e}");
    }

    pcm.map_err(|e| PlaybackError::Transcode(format!("could not read ffmpeg output: {e}")))
}
