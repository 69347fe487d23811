//! Folder and file name rules shared by the client checks and the backend.

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Characters never accepted in a folder or file name.
pub const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Why a name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    /// Empty or whitespace only.
    Empty,
    /// Longer than [`MAX_NAME_LEN`].
    TooLong,
    /// Contains a character from [`FORBIDDEN_CHARS`] or a control character.
    ForbiddenChar,
    /// `.` or `..`.
    Reserved,
}

impl NameViolation {
    /// Human-readable description.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Empty => "Name cannot be empty",
            Self::TooLong => "Name is longer than 255 characters",
            Self::ForbiddenChar => "Name contains a character that is not allowed",
            Self::Reserved => "Name is reserved",
        }
    }
}

/// Check a folder or file name.
pub fn check_name(name: &str) -> Result<(), NameViolation> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameViolation::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(NameViolation::TooLong);
    }
    if trimmed
        .chars()
        .any(|c| FORBIDDEN_CHARS.contains(&c) || c.is_control())
    {
        return Err(NameViolation::ForbiddenChar);
    }
    if trimmed == "." || trimmed == ".." {
        return Err(NameViolation::Reserved);
    }
    Ok(())
}
