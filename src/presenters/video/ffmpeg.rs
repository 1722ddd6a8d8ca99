use std::fs;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::controllers::ports::frame_sink::{AnimationEncoderPort, FrameSink};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData};
use crate::core::data::resolution::Resolution;

#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffmpeg was not found at '{}'; install it or set ffmpeg_path", .program.display())]
    NotFound { program: PathBuf },
    #[error("failed to start ffmpeg")]
    Spawn(#[source] std::io::Error),
    #[error("ffmpeg did not expose a stdin pipe")]
    NoStdin,
    #[error("frame {index} is {actual} but the video is {expected}")]
    FrameSize {
        index: usize,
        actual: Resolution,
        expected: Resolution,
    },
    #[error("failed to pipe frame {index} to ffmpeg")]
    Write {
        index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for ffmpeg")]
    Wait(#[source] std::io::Error),
    #[error("ffmpeg stopped accepting frames")]
    WriterStopped,
    #[error("ffmpeg exited with {status}")]
    Exit { status: std::process::ExitStatus },
    #[error("failed to move the finished video to '{}'", .path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encodes animations to H.264 MP4 by piping raw RGB24 frames into an
/// `ffmpeg` child process.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, filepath: &Path, resolution: Resolution, fps: u32) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgb24")
            .arg("-s")
            .arg(resolution.to_string())
            .arg("-r")
            .arg(fps.to_string())
            .arg("-i")
            .arg("-")
            .arg("-an")
            .arg("-pix_fmt")
            .arg("yuv420p")
            .arg("-f")
            .arg("mp4")
            .arg(filepath)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl AnimationEncoderPort for FfmpegEncoder {
    fn open(&self, filepath: &Path, resolution: Resolution, fps: u32) -> anyhow::Result<Box<dyn FrameSink>> {
        let partial = partial_path(filepath);
        let child = self
            .command(&partial, resolution, fps)
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => FfmpegError::NotFound {
                    program: self.program.clone(),
                },
                _ => FfmpegError::Spawn(err),
            })?;

        // from here on, dropping the sink kills ffmpeg and removes the partial file
        let mut sink = FfmpegSink {
            child: Some(child),
            frames: None,
            writer: None,
            stderr: None,
            resolution,
            target: filepath.to_path_buf(),
            partial,
        };

        let (stdin, stderr) = match sink.child.as_mut() {
            Some(child) => (child.stdin.take(), child.stderr.take()),
            None => (None, None),
        };
        let stdin = stdin.ok_or(FfmpegError::NoStdin)?;

        if let Some(stderr) = stderr {
            sink.stderr = Some(
                thread::Builder::new()
                    .name("ffmpeg-stderr".to_string())
                    .spawn(move || {
                        forward_stderr(stderr);
                    })
                    .map_err(FfmpegError::Spawn)?,
            );
        }

        let (frames, queue) = mpsc::sync_channel(FRAME_QUEUE_DEPTH);
        sink.frames = Some(frames);
        sink.writer = Some(
            thread::Builder::new()
                .name("ffmpeg-writer".to_string())
                .spawn(move || pipe_frames(stdin, queue))
                .map_err(FfmpegError::Spawn)?,
        );

        debug!(path = %filepath.display(), %resolution, fps, "ffmpeg started");

        Ok(Box::new(sink))
    }

    fn extension(&self) -> &'static str {
        "mp4"
    }
}

/// Frames buffered between the renderer and the ffmpeg pipe.
const FRAME_QUEUE_DEPTH: usize = 8;

/// Where ffmpeg writes until the video is complete, e.g. `zoom.mp4.partial`.
fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn pipe_frames(mut stdin: ChildStdin, queue: Receiver<(usize, PixelBufferData)>) -> Result<(), FfmpegError> {
    for (index, data) in queue {
        stdin
            .write_all(&data)
            .map_err(|source| FfmpegError::Write { index, source })?;
    }

    // dropping stdin tells ffmpeg the stream has ended
    Ok(())
}

/// Logs each non-empty line ffmpeg prints, keeping it off the terminal.
/// Returns how many lines were forwarded.
fn forward_stderr<R: Read>(stderr: R) -> usize {
    let mut forwarded = 0;

    for line in BufReader::new(stderr).lines().map_while(Result::ok) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        warn!("ffmpeg: {}", line);
        forwarded += 1;
    }

    forwarded
}

/// Streams frames over a bounded channel to a writer thread that owns
/// ffmpeg's stdin, so rendering the next batch overlaps with encoding.
///
/// ffmpeg writes to `partial`, which only becomes `target` once `finish`
/// succeeds.
struct FfmpegSink {
    child: Option<Child>,
    frames: Option<SyncSender<(usize, PixelBufferData)>>,
    writer: Option<JoinHandle<Result<(), FfmpegError>>>,
    stderr: Option<JoinHandle<()>>,
    resolution: Resolution,
    target: PathBuf,
    partial: PathBuf,
}

impl FfmpegSink {
    fn join_writer(&mut self) -> Result<(), FfmpegError> {
        self.frames = None;

        match self.writer.take().map(JoinHandle::join) {
            None | Some(Ok(Ok(()))) => Ok(()),
            Some(Ok(Err(err))) => Err(err),
            Some(Err(_)) => Err(FfmpegError::WriterStopped),
        }
    }

    fn wait_child(&mut self) -> Result<(), FfmpegError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait().map_err(FfmpegError::Wait);
        self.join_stderr();

        let status = status?;
        if !status.success() {
            return Err(FfmpegError::Exit { status });
        }

        Ok(())
    }

    fn join_stderr(&mut self) {
        if let Some(handle) = self.stderr.take() {
            let _ = handle.join();
        }
    }

    fn remove_partial(&self) {
        match fs::remove_file(&self.partial) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(path = %self.partial.display(), error = %err, "failed to remove partial video"),
        }
    }

    /// Stops ffmpeg without letting it finalise the file, then removes
    /// whatever it wrote.
    fn discard(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.kill();
        }

        // write errors are expected once ffmpeg is gone
        let _ = self.join_writer();
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
        self.join_stderr();

        self.remove_partial();
    }
}

impl FrameSink for FfmpegSink {
    fn push_frame(&mut self, index: usize, frame: &PixelBuffer) -> anyhow::Result<()> {
        if frame.resolution() != self.resolution {
            return Err(FfmpegError::FrameSize {
                index,
                actual: frame.resolution(),
                expected: self.resolution,
            }
            .into());
        }

        let sent = match &self.frames {
            Some(frames) => frames.send((index, frame.buffer().clone())).is_ok(),
            None => false,
        };

        if !sent {
            // the writer only hangs up after a failed write
            self.join_writer()?;
            return Err(FfmpegError::WriterStopped.into());
        }

        Ok(())
    }

    fn finish(mut self: Box<Self>) -> anyhow::Result<()> {
        let written = self.join_writer();
        let exited = self.wait_child();

        if let Err(err) = written.and(exited) {
            self.remove_partial();
            return Err(err.into());
        }

        fs::rename(&self.partial, &self.target).map_err(|source| FfmpegError::Rename {
            path: self.target.clone(),
            source,
        })?;

        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // a child still running here means finish was never reached
        if self.child.is_some() {
            warn!(path = %self.target.display(), "animation aborted; discarding the incomplete video");
            self.discard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &Command) -> Vec<String> {
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn command_reads_raw_rgb_from_stdin() {
        let encoder = FfmpegEncoder::default();
        let partial = partial_path(Path::new("out.mp4"));
        let command = encoder.command(&partial, Resolution::new(640, 360).unwrap(), 30);
        let args = args(&command);

        assert_eq!(command.get_program(), "ffmpeg");
        let joined = args.join(" ");
        assert!(joined.contains("-f rawvideo -pix_fmt rgb24 -s 640x360 -r 30 -i -"));
        assert!(joined.ends_with("-pix_fmt yuv420p -f mp4 out.mp4.partial"));
    }

    #[test]
    fn partial_path_keeps_the_full_file_name() {
        assert_eq!(
            partial_path(Path::new("anim/(-0.5, 0) 4 (16, 9).mp4")),
            PathBuf::from("anim/(-0.5, 0) 4 (16, 9).mp4.partial")
        );
    }

    #[test]
    fn stderr_lines_are_forwarded_without_blanks() {
        let output = "Unknown encoder 'libx264'\n\n  \nConversion failed!\n";

        assert_eq!(forward_stderr(output.as_bytes()), 2);
    }

    /// A stand-in for ffmpeg that runs `body` with `$out` set to the last
    /// argument.
    #[cfg(unix)]
    fn fake_ffmpeg(dir: &Path, body: &str) -> FfmpegEncoder {
        use std::os::unix::fs::PermissionsExt;

        let program = dir.join("fake-ffmpeg");
        fs::write(&program, format!("#!/bin/sh\nfor arg; do out=\"$arg\"; done\n{}\n", body)).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        FfmpegEncoder::new(program)
    }

    #[cfg(unix)]
    fn frame(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(Resolution::new(width, height).unwrap())
    }

    #[cfg(unix)]
    #[test]
    fn finished_video_appears_at_the_target_path() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = fake_ffmpeg(dir.path(), "exec cat > \"$out\"");
        let target = dir.path().join("zoom.mp4");

        let mut sink = encoder.open(&target, Resolution::new(2, 2).unwrap(), 30).unwrap();
        sink.push_frame(0, &frame(2, 2)).unwrap();
        sink.push_frame(1, &frame(2, 2)).unwrap();
        sink.finish().unwrap();

        assert_eq!(fs::read(&target).unwrap().len(), 2 * 2 * 3 * 2);
        assert!(!partial_path(&target).exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_frame_leaves_no_video_behind() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = fake_ffmpeg(dir.path(), "exec cat > \"$out\"");
        let target = dir.path().join("zoom.mp4");

        let mut sink = encoder.open(&target, Resolution::new(2, 2).unwrap(), 30).unwrap();
        sink.push_frame(0, &frame(2, 2)).unwrap();
        let err = sink.push_frame(1, &frame(3, 2)).unwrap_err();
        drop(sink);

        assert!(err.to_string().contains("frame 1"));
        assert!(!target.exists());
        assert!(!partial_path(&target).exists());
    }

    #[cfg(unix)]
    #[test]
    fn ffmpeg_failure_leaves_no_video_behind() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = fake_ffmpeg(dir.path(), "cat > \"$out\"\necho 'Conversion failed!' >&2\nexit 1");
        let target = dir.path().join("zoom.mp4");

        let mut sink = encoder.open(&target, Resolution::new(2, 2).unwrap(), 30).unwrap();
        sink.push_frame(0, &frame(2, 2)).unwrap();
        let err = sink.finish().unwrap_err();

        assert!(err.to_string().contains("exited with"));
        assert!(!target.exists());
        assert!(!partial_path(&target).exists());
    }

    #[test]
    fn missing_program_is_reported_by_name() {
        let encoder = FfmpegEncoder::new("/nonexistent/ffmpeg-binary");
        let dir = tempfile::tempdir().unwrap();

        let err = match encoder.open(&dir.path().join("x.mp4"), Resolution::new(2, 2).unwrap(), 30) {
            Ok(_) => panic!("spawning a missing program should fail"),
            Err(err) => err,
        };

        assert!(err.to_string().contains("/nonexistent/ffmpeg-binary"));
    }
}
