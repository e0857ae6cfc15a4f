// One error type for the whole program.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    CameraInit(String),   // Opening/starting the camera failed
    CameraFrame(String),  // Grabbing/decoding a frame failed
    DetectorInit(String), // Spawning the hand detector or its handshake failed
    Detector(String),     // Talking to a running detector failed
    Palette(String),      // Loading/decoding the palette image failed
    Config(String),       // Reading/parsing/validating the config file failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::DetectorInit(s) => write!(f, "Detector init error: {s}"),
            Error::Detector(s) => write!(f, "Detector error: {s}"),
            Error::Palette(s) => write!(f, "Palette error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
