//! Sort-key parsing for film listings.
//!
//! Sort keys arrive as query strings such as `-rating` or `title`. A leading
//! `-` means descending. Unknown field names do not produce an error: the
//! caller gets `None` and leaves the query unsorted.

/// Default film sort key (highest rated first).
pub const DEFAULT_FILM_SORT: &str = "-rating";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Film columns that may be used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmSortField {
    Rating,
    CreationDate,
    Title,
}

impl FilmSortField {
    /// Map a public field name onto a sortable column.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rating" => Some(FilmSortField::Rating),
            "creation_date" => Some(FilmSortField::CreationDate),
            "title" => Some(FilmSortField::Title),
            _ => None,
        }
    }

    /// Column name in `content.film_work`.
    pub fn column(self) -> &'static str {
        match self {
            FilmSortField::Rating => "rating",
            FilmSortField::CreationDate => "creation_date",
            FilmSortField::Title => "title",
        }
    }
}

/// A parsed film sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmSort {
    pub field: FilmSortField,
    pub direction: SortDirection,
}

impl FilmSort {
    /// Parse a sort key. Returns `None` for unrecognized field names.
    pub fn parse(sort_by: &str) -> Option<Self> {
        let (name, direction) = match sort_by.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (sort_by, SortDirection::Asc),
        };
        FilmSortField::from_name(name).map(|field| FilmSort { field, direction })
    }

    /// `ORDER BY` fragment for this sort, with the primary key as tie-breaker
    /// so offset pagination is deterministic.
    pub fn order_by_sql(self) -> String {
        format!(
            "{} {} NULLS LAST, id ASC",
            self.field.column(),
            self.direction.as_sql()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_dash_is_descending() {
        assert_eq!(
            FilmSort::parse("-rating"),
            Some(FilmSort {
                field: FilmSortField::Rating,
                direction: SortDirection::Desc,
            })
        );
    }

    #[test]
    fn bare_name_is_ascending() {
        assert_eq!(
            FilmSort::parse("creation_date"),
            Some(FilmSort {
                field: FilmSortField::CreationDate,
                direction: SortDirection::Asc,
            })
        );
    }

    #[test]
    fn unknown_field_is_unsorted() {
        assert_eq!(FilmSort::parse("budget"), None);
        assert_eq!(FilmSort::parse("-budget"), None);
        assert_eq!(FilmSort::parse(""), None);
        assert_eq!(FilmSort::parse("-"), None);
    }

    #[test]
    fn double_dash_is_not_a_field() {
        assert_eq!(FilmSort::parse("--rating"), None);
    }

    #[test]
    fn order_by_includes_tie_breaker() {
        let sort = FilmSort::parse("title").unwrap();
        assert_eq!(sort.order_by_sql(), "title ASC NULLS LAST, id ASC");
    }

    #[test]
    fn default_sort_parses() {
        assert!(FilmSort::parse(DEFAULT_FILM_SORT).is_some());
    }
}
