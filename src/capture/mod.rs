//! Camera frame types
//!
//! Frames arrive already cropped to the card cutout and oriented by the camera
//! layer. Pixels are passed through to the text recognizer untouched.

pub mod frame;

pub use frame::CapturedFrame;
