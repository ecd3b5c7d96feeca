use crate::types::ids::CourseId;
use crate::types::progress::ProgressFilters;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc`/`desc`, case-insensitive. Anything else is "no sort".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseFilter {
    All,
    Only(CourseId),
    /// A value that can never name a course; matches no learner.
    Unmatched,
}

impl CourseFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(raw) => CourseId::parse(raw).map_or(Self::Unmatched, Self::Only),
        }
    }

    pub fn course_id(self) -> Option<CourseId> {
        match self {
            Self::Only(id) => Some(id),
            Self::All | Self::Unmatched => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressQuery {
    pub course: CourseFilter,
    pub sort: Option<SortDirection>,
}

impl ProgressQuery {
    pub fn new(course: CourseFilter, sort: Option<SortDirection>) -> Self {
        Self { course, sort }
    }

    pub fn from_filters(filters: &ProgressFilters) -> Self {
        Self {
            course: CourseFilter::parse(filters.course_id.as_deref()),
            sort: filters.sort.as_deref().and_then(SortDirection::parse),
        }
    }
}

impl Default for ProgressQuery {
    fn default() -> Self {
        Self::new(CourseFilter::All, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_course_id_means_no_filter() {
        assert_eq!(CourseFilter::parse(None), CourseFilter::All);
        assert_eq!(CourseFilter::parse(Some("")), CourseFilter::All);
        assert_eq!(CourseFilter::parse(Some("   ")), CourseFilter::All);
    }

    #[test]
    fn numeric_course_id_filters_on_that_course() {
        assert_eq!(
            CourseFilter::parse(Some("3")),
            CourseFilter::Only(CourseId::new(3))
        );
    }

    #[test]
    fn non_numeric_course_id_matches_nothing() {
        assert_eq!(CourseFilter::parse(Some("maths")), CourseFilter::Unmatched);
        assert_eq!(CourseFilter::Unmatched.course_id(), None);
    }

    #[test]
    fn sort_accepts_only_asc_and_desc() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("sideways"), None);
        assert_eq!(SortDirection::parse(""), None);
    }

    #[test]
    fn query_from_filters_parses_both_fields() {
        let filters = ProgressFilters::new(Some("2"), Some("desc"));
        let query = ProgressQuery::from_filters(&filters);
        assert_eq!(query.course, CourseFilter::Only(CourseId::new(2)));
        assert_eq!(query.sort, Some(SortDirection::Desc));
    }
}
