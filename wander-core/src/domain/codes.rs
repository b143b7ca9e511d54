//! Station and stop identifier types.

use std::fmt;

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code: {reason}")]
pub struct InvalidCrs {
    reason: &'static str,
}

/// A valid 3-letter CRS (Computer Reservation System) station code.
///
/// CRS codes identify National Rail stations ("VIC" for Victoria, "PAD"
/// for Paddington). Always 3 uppercase ASCII letters; any `Crs` value is
/// valid by construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code: exactly 3 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCrs {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCrs {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(Crs([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only uppercase ASCII is ever stored
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl TryFrom<String> for Crs {
    type Error = InvalidCrs;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Crs::parse(&s)
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.as_str().to_string()
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid ATCO code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ATCO code: {reason}")]
pub struct InvalidAtco {
    reason: &'static str,
}

/// A valid ATCO bus-stop identifier.
///
/// ATCO codes identify UK bus stops (e.g. `490000251S`): a numeric area
/// prefix followed by an alphanumeric stop reference. We accept 4 to 12
/// ASCII alphanumeric characters starting with a digit, which covers
/// every code the transit API serves.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Atco(String);

impl Atco {
    /// Parse an ATCO code.
    pub fn parse(s: &str) -> Result<Self, InvalidAtco> {
        let bytes = s.as_bytes();

        if !(4..=12).contains(&bytes.len()) {
            return Err(InvalidAtco {
                reason: "must be 4 to 12 characters",
            });
        }

        if !bytes[0].is_ascii_digit() {
            return Err(InvalidAtco {
                reason: "must start with a digit",
            });
        }

        for &b in bytes {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidAtco {
                    reason: "must be ASCII letters and digits only",
                });
            }
        }

        Ok(Atco(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Atco {
    type Error = InvalidAtco;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Atco::parse(&s)
    }
}

impl From<Atco> for String {
    fn from(atco: Atco) -> Self {
        atco.0
    }
}

impl fmt::Debug for Atco {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atco({})", self.0)
    }
}

impl fmt::Display for Atco {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
