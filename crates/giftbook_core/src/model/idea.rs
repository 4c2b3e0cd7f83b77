//! Gift idea record.
//!
//! # Responsibility
//! - Define the idea shape persisted inside each person's `ideas` list.
//! - Compute display dimensions the way the capture screen sizes photos.
//!
//! # Invariants
//! - `id` is stable and never reused for another idea.
//! - `width`/`height` are fixed at capture time and never recomputed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one gift idea.
pub type IdeaId = Uuid;

/// Share of the screen width used by a captured photo.
pub const CAPTURE_WIDTH_RATIO: f64 = 0.7;
/// Height-to-width ratio of a captured photo.
pub const CAPTURE_ASPECT_RATIO: f64 = 2.0 / 3.0;

/// Display size stored with an idea so it renders identically later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdeaDimensions {
    pub width: f64,
    pub height: f64,
}

impl IdeaDimensions {
    /// Sizes a photo for a screen of `screen_width` logical pixels.
    pub fn for_screen_width(screen_width: f64) -> Self {
        let width = screen_width * CAPTURE_WIDTH_RATIO;
        Self {
            width,
            height: width * CAPTURE_ASPECT_RATIO,
        }
    }

    /// Returns whether both sides are finite and strictly positive.
    pub fn is_renderable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One gift idea: a description plus a photo reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    /// Free-form gift description.
    pub text: String,
    /// Opaque URI/path supplied by the capture layer.
    pub img: String,
    pub width: f64,
    pub height: f64,
}

impl Idea {
    /// Creates an idea with a freshly generated id.
    pub fn new(text: impl Into<String>, img: impl Into<String>, size: IdeaDimensions) -> Self {
        Self::with_id(Uuid::new_v4(), text, img, size)
    }

    /// Creates an idea with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: IdeaId,
        text: impl Into<String>,
        img: impl Into<String>,
        size: IdeaDimensions,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            img: img.into(),
            width: size.width,
            height: size.height,
        }
    }

    pub fn dimensions(&self) -> IdeaDimensions {
        IdeaDimensions {
            width: self.width,
            height: self.height,
        }
    }
}
