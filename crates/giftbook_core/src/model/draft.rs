//! Caller-side input drafts for new people and ideas.
//!
//! # Responsibility
//! - Validate raw UI input before it becomes a `Person` or `Idea`.
//! - Assign fresh ids at creation time.
//!
//! # Invariants
//! - The people store never calls these; it assumes well-formed input.
//! - Text fields are trimmed before validation and storage.

use crate::model::birthday::{Birthday, BirthdayParseError};
use crate::model::idea::{Idea, IdeaDimensions};
use crate::model::person::Person;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    EmptyDob,
    InvalidDob(BirthdayParseError),
    EmptyText,
    EmptyImage,
    InvalidDimensions { width: f64, height: f64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::EmptyDob => write!(f, "date of birth cannot be empty"),
            Self::InvalidDob(err) => write!(f, "{err}"),
            Self::EmptyText => write!(f, "gift idea text cannot be empty"),
            Self::EmptyImage => write!(f, "gift idea needs a picture"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "image dimensions must be positive, got {width}x{height}")
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDob(err) => Some(err),
            _ => None,
        }
    }
}

/// Raw "add person" form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub dob: String,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dob: dob.into(),
        }
    }

    /// Validates the draft and produces a new person with a fresh id.
    ///
    /// # Errors
    /// - `EmptyName` / `EmptyDob` when a field is blank.
    /// - `InvalidDob` when `dob` cannot be parsed into month and day.
    pub fn validate(&self) -> Result<Person, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let dob = self.dob.trim();
        if dob.is_empty() {
            return Err(ValidationError::EmptyDob);
        }
        Birthday::parse(dob).map_err(ValidationError::InvalidDob)?;

        Ok(Person::new(name, dob))
    }
}

/// Raw "add idea" form input, including the captured photo.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaDraft {
    pub text: String,
    pub img: String,
    pub size: IdeaDimensions,
}

impl IdeaDraft {
    pub fn new(text: impl Into<String>, img: impl Into<String>, size: IdeaDimensions) -> Self {
        Self {
            text: text.into(),
            img: img.into(),
            size,
        }
    }

    /// Validates the draft and produces a new idea with a fresh id.
    pub fn validate(&self) -> Result<Idea, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let img = self.img.trim();
        if img.is_empty() {
            return Err(ValidationError::EmptyImage);
        }
        if !self.size.is_renderable() {
            return Err(ValidationError::InvalidDimensions {
                width: self.size.width,
                height: self.size.height,
            });
        }

        Ok(Idea::new(text, img, self.size))
    }
}
