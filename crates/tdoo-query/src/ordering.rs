//! Sort keys for executed queries.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for column-based
//! ordering. Sort keys are rendered into the storage `orderBy` string.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns the SQL keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort key: a column and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The column to sort by.
    pub column: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new sort key.
    pub fn new(column: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            column: column.into(),
            dir,
        }
    }

    /// Ascending sort key.
    pub fn asc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Dir::Asc)
    }

    /// Descending sort key.
    pub fn desc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Dir::Desc)
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.column, self.dir)
    }
}

/// Joins sort keys into an `ORDER BY` body, or `None` when there are none.
pub fn render_order(orderings: &[OrderBy]) -> Option<String> {
    if orderings.is_empty() {
        return None;
    }
    let keys: Vec<String> = orderings.iter().map(ToString::to_string).collect();
    Some(keys.join(", "))
}
