//! Test centre identifiers.

use std::fmt;

/// Error returned when parsing an invalid centre identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid centre id: {reason}")]
pub struct InvalidCentreId {
    reason: &'static str,
}

/// A validated test centre identifier.
///
/// Centre ids come from the centre-search service and key every slot
/// lookup. They are opaque beyond their shape: 1-32 ASCII alphanumerics
/// or hyphens, guaranteed by construction.
///
/// # Examples
///
/// ```
/// use booking_server::domain::CentreId;
///
/// let centre = CentreId::parse("birmingham-1").unwrap();
/// assert_eq!(centre.as_str(), "birmingham-1");
///
/// assert!(CentreId::parse("").is_err());
/// assert!(CentreId::parse("no spaces").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CentreId(String);

impl CentreId {
    /// Maximum accepted length.
    const MAX_LEN: usize = 32;

    /// Parse a centre identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidCentreId> {
        if s.is_empty() {
            return Err(InvalidCentreId {
                reason: "must not be empty",
            });
        }
        if s.len() > Self::MAX_LEN {
            return Err(InvalidCentreId {
                reason: "must be at most 32 characters",
            });
        }
        for b in s.bytes() {
            if !b.is_ascii_alphanumeric() && b != b'-' {
                return Err(InvalidCentreId {
                    reason: "must be ASCII alphanumerics or hyphens",
                });
            }
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CentreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CentreId({})", self.0)
    }
}

impl fmt::Display for CentreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
