//! Encoding buffered frames into GIF and video files.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::Delay;
use image::codecs::gif::{GifEncoder, Repeat};
use log::debug;

use super::RecordError;
use crate::render::Frame;
use crate::schema::EncoderConfig;

/// Output container family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Looping animated GIF, encoded in-process.
    Gif,
    /// Any container the external encoder understands, chosen by extension.
    Video,
}

impl Container {
    /// Pick the container from a path's extension. Everything that is not
    /// `.gif` is handed to the video encoder.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("gif") => Container::Gif,
            _ => Container::Video,
        }
    }
}

/// Statistics from a successful save.
#[derive(Debug, Clone)]
pub struct EncodeStats {
    /// Destination file.
    pub path: PathBuf,
    /// Frames written.
    pub frame_count: usize,
    /// Playback rate.
    pub fps: u32,
    /// Frame size in pixels.
    pub width: u32,
    pub height: u32,
    /// Container used.
    pub container: Container,
}

impl EncodeStats {
    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 / self.fps as f64
    }
}

impl std::fmt::Display for EncodeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames ({}x{}) at {} fps, {:.2}s ({:?}) -> {}",
            self.frame_count,
            self.width,
            self.height,
            self.fps,
            self.duration_secs(),
            self.container,
            self.path.display()
        )
    }
}

/// Write `frames` as an infinitely looping GIF, each shown for `1/fps` s.
pub fn write_gif(frames: &[Frame], path: &Path, fps: u32) -> Result<(), RecordError> {
    let delay = Delay::from_numer_denom_ms(1000, fps);
    let mut writer = BufWriter::new(File::create(path)?);
    {
        let mut encoder = GifEncoder::new_with_speed(&mut writer, 10);
        encoder.set_repeat(Repeat::Infinite)?;
        for frame in frames {
            let rgba = frame.to_rgba_image();
            encoder.encode_frame(image::Frame::from_parts(rgba, 0, 0, delay))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Pipe `frames` as raw RGB24 into the external encoder.
pub fn write_video(
    frames: &[Frame],
    path: &Path,
    fps: u32,
    config: &EncoderConfig,
) -> Result<(), RecordError> {
    let Some(first) = frames.first() else {
        return Ok(());
    };
    let (width, height) = first.dimensions();

    let mut child = Command::new(&config.program)
        .args(video_args(width, height, fps, config))
        .arg(output_arg(path))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RecordError::EncoderNotFound {
            program: config.program.clone(),
            source,
        })?;

    let write_result = match child.stdin.take() {
        Some(mut stdin) => pipe_frames(&mut stdin, frames),
        None => Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "encoder stdin unavailable",
        )),
    };

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RecordError::EncoderFailed(stderr.trim().to_owned()));
    }
    // The encoder exited cleanly, so any pipe error is a real I/O failure.
    write_result?;
    Ok(())
}

fn pipe_frames<W: Write>(stdin: &mut W, frames: &[Frame]) -> io::Result<()> {
    let step = (frames.len() / 10).max(1);
    for (i, frame) in frames.iter().enumerate() {
        stdin.write_all(frame.as_bytes())?;
        if i % step == 0 {
            debug!("encoding: {}%", i * 100 / frames.len());
        }
    }
    stdin.flush()
}

/// Relative paths get a `./` prefix so a leading `-` is not read as an option.
fn output_arg(path: &Path) -> PathBuf {
    if path.is_relative() {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

fn video_args(width: u32, height: u32, fps: u32, config: &EncoderConfig) -> Vec<String> {
    let mut args: Vec<String> = [
        "-y",
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pixel_format",
        "rgb24",
        "-video_size",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();
    args.push(format!("{width}x{height}"));
    args.extend(["-framerate".to_owned(), fps.to_string()]);
    args.extend(["-i".to_owned(), "-".to_owned()]);
    // yuv420p needs even dimensions.
    args.extend([
        "-vf".to_owned(),
        "pad=ceil(iw/2)*2:ceil(ih/2)*2".to_owned(),
    ]);
    args.extend(["-c:v".to_owned(), config.codec.clone()]);
    args.extend(["-pix_fmt".to_owned(), config.pixel_format.clone()]);
    args.extend(["-preset".to_owned(), config.preset.clone()]);
    args.extend(["-crf".to_owned(), config.crf.to_string()]);
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_from_extension() {
        assert_eq!(Container::from_path(Path::new("a.gif")), Container::Gif);
        assert_eq!(Container::from_path(Path::new("a.GIF")), Container::Gif);
        assert_eq!(Container::from_path(Path::new("a.mp4")), Container::Video);
        assert_eq!(Container::from_path(Path::new("noext")), Container::Video);
    }

    #[test]
    fn test_video_args() {
        let args = video_args(721, 480, 10, &EncoderConfig::default());
        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("-video_size") + 1], "721x480");
        assert_eq!(args[pos("-framerate") + 1], "10");
        assert_eq!(args[pos("-c:v") + 1], "libx264");
        assert_eq!(args[pos("-crf") + 1], "23");
    }

    #[test]
    fn test_output_arg_never_looks_like_a_flag() {
        assert_eq!(output_arg(Path::new("-out.mp4")), PathBuf::from("./-out.mp4"));
        assert_eq!(output_arg(Path::new("/tmp/a.mp4")), PathBuf::from("/tmp/a.mp4"));
    }

    #[test]
    fn test_stats_duration() {
        let stats = EncodeStats {
            path: PathBuf::from("out.mp4"),
            frame_count: 30,
            fps: 10,
            width: 720,
            height: 720,
            container: Container::Video,
        };
        assert!((stats.duration_secs() - 3.0).abs() < 1e-12);
        assert!(stats.to_string().starts_with("30 frames (720x720) at 10 fps"));
    }
}
