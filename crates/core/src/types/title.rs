//! Product title type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemTitle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// The input is empty or whitespace only.
    #[error("title cannot be blank")]
    Empty,
}

/// A product title.
///
/// The title is the identity of a line item: two entries with the same
/// title are the same product and are merged instead of duplicated.
/// Comparison is exact, so `"Mug"` and `"mug"` are different products.
///
/// ## Examples
///
/// ```
/// use nucart_core::ItemTitle;
///
/// assert!(ItemTitle::parse("Red Rice (1kg)").is_ok());
/// assert!(ItemTitle::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ItemTitle(String);

impl ItemTitle {
    /// Parse an `ItemTitle` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError::Empty`] if the input is empty or whitespace
    /// only. Other titles are kept exactly as given.
    pub fn parse(s: &str) -> Result<Self, TitleError> {
        Self::try_from(s.to_owned())
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ItemTitle` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemTitle {
    type Err = TitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemTitle {
    type Error = TitleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(TitleError::Empty);
        }
        Ok(Self(s))
    }
}

impl From<ItemTitle> for String {
    fn from(title: ItemTitle) -> Self {
        title.0
    }
}

impl AsRef<str> for ItemTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
