// Hand landmark detection through an external MediaPipe helper process.
// Protocol: the helper prints `READY` once it has loaded its model. Then, for every
// frame, we write a little-endian `u32` header (width, height, channels = 3) followed by
// the raw RGB bytes, and it answers with one JSON line:
//   {"hands":[{"score":0.97,"landmarks":[{"x":0.41,"y":0.62,"z":-0.01}, ...]}],"error":null}

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Deserialize;

use crate::config::DetectorConfig;
use crate::error::Error;
use crate::landmarks::NormalizedPoint;
use crate::types::{channels, FrameBuffer};

/// Anything that can find (at most) one hand in a frame.
pub trait HandDetector {
    /// Normalized landmarks of the most confident hand, or `None`.
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<Vec<NormalizedPoint>>, Error>;
}

#[derive(Deserialize, Debug)]
struct HandJson {
    score: f32,
    landmarks: Vec<NormalizedPoint>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Pick the first hand scoring at least `min_confidence` out of one response line.
fn parse_response(line: &str, min_confidence: f32) -> Option<Vec<NormalizedPoint>> {
    let result: DetectionResult = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("unparseable detector response ({e}): {}", line.trim());
            return None;
        }
    };
    if let Some(error) = result.error {
        log::warn!("detector reported: {error}");
        return None;
    }
    result
        .hands
        .into_iter()
        .find(|h| h.score >= min_confidence)
        .map(|h| h.landmarks)
}

pub struct SubprocessDetector {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    min_confidence: f32,
    scratch: Vec<u8>,
}

impl SubprocessDetector {
    /// Start the helper and wait for its `READY` line.
    pub fn spawn(config: &DetectorConfig) -> Result<Self, Error> {
        log::info!("starting hand detector: {} {}", config.program, config.args.join(" "));

        let mut process = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::DetectorInit(format!("spawn `{}`: {e}", config.program)))?;

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            let _ = process.kill();
            return Err(Error::DetectorInit("helper pipes unavailable".into()));
        };
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        if let Err(e) = stdout.read_line(&mut ready) {
            let _ = process.kill();
            return Err(Error::DetectorInit(format!("waiting for READY: {e}")));
        }
        if ready.trim() != "READY" {
            let _ = process.kill();
            return Err(Error::DetectorInit(format!("expected READY, got {:?}", ready.trim())));
        }

        log::info!("hand detector ready");
        Ok(Self {
            process,
            stdin,
            stdout,
            min_confidence: config.min_confidence,
            scratch: Vec::new(),
        })
    }
}

impl HandDetector for SubprocessDetector {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<Vec<NormalizedPoint>>, Error> {
        self.scratch.clear();
        for v in [frame.width as u32, frame.height as u32, 3u32] {
            self.scratch.extend_from_slice(&v.to_le_bytes());
        }
        for &px in &frame.pixels {
            let (r, g, b) = channels(px);
            self.scratch.extend_from_slice(&[r, g, b]);
        }

        self.stdin
            .write_all(&self.scratch)
            .and_then(|()| self.stdin.flush())
            .map_err(|e| Error::Detector(format!("send frame: {e}")))?;

        let mut line = String::new();
        let n = self
            .stdout
            .read_line(&mut line)
            .map_err(|e| Error::Detector(format!("read response: {e}")))?;
        if n == 0 {
            return Err(Error::Detector("helper exited".into()));
        }

        Ok(parse_response(&line, self.min_confidence))
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
