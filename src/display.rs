//! Display adapters for slices of tickets, stakes, and the like.

use std::fmt::{Display, Formatter};

/// Renders slice items in order, separated by `separator`.
pub struct DisplaySlice<'a, D: Display> {
    items: &'a [D],
    separator: &'a str,
}
impl<'a, D: Display> DisplaySlice<'a, D> {
    /// Joins items with `+`, the way a combination of tickets is written on a slip.
    pub fn plus(items: &'a [D]) -> Self {
        Self {
            items,
            separator: " + ",
        }
    }

    /// Joins items with `,`.
    pub fn comma(items: &'a [D]) -> Self {
        Self {
            items,
            separator: ", ",
        }
    }
}

impl<'a, D: Display> Display for DisplaySlice<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index != 0 {
                write!(f, "{}", self.separator)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
