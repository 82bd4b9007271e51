use serde::{Deserialize, Serialize};

/// Subject string the hosting LMS frame dispatches on.
pub const FRAME_RESIZE_SUBJECT: &str = "lti.frameResize";

/// Cross-frame height notification posted to the parent window so the
/// embedding container can be resized to fit. Fire-and-forget; the
/// receiver must tolerate duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResizeMessage {
    pub subject: String,
    /// Document body scroll height in CSS pixels.
    pub height: i32,
}

impl FrameResizeMessage {
    pub fn new(height: i32) -> Self {
        Self {
            subject: FRAME_RESIZE_SUBJECT.to_string(),
            height,
        }
    }
}
