//! Frame data handed from the camera layer to text recognition

use std::time::Instant;

/// A cropped camera frame of the card region
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Raw pixel data, layout owned by the camera layer
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// When the camera delivered the frame
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Wrap a pixel buffer delivered now
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// A frame with no pixels, for recognizers that ignore image content
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    /// Whether the frame carries any pixel data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }
}
