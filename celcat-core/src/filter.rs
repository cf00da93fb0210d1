//! Group/course filter expressions.
//!
//! Grammar: `G1[,G2,...]:C1[,C2,...][+...]`
//!
//! Clauses are separated by `+` and OR-ed together. Within a clause the
//! group alternatives (before `:`) and the course alternatives (after `:`)
//! are AND-ed; an event matches a side when one of its alternatives is a
//! substring of the event's value. A side without alternatives does not
//! constrain the event.

use std::fmt;
use std::str::FromStr;

use crate::error::{CelcatError, CelcatResult};

const CLAUSE_SEPARATOR: char = '+';
const SIDE_SEPARATOR: char = ':';
const ALTERNATIVE_SEPARATOR: char = ',';

/// One `groups:courses` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterClause {
    pub groups: Vec<String>,
    pub courses: Vec<String>,
}

impl FilterClause {
    pub fn new<G, C>(groups: G, courses: C) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        FilterClause {
            groups: groups.into_iter().map(Into::into).collect(),
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, groups: &[String], course: Option<&str>) -> bool {
        self.matches_groups(groups) && self.matches_course(course)
    }

    fn matches_groups(&self, groups: &[String]) -> bool {
        self.groups.is_empty()
            || self
                .groups
                .iter()
                .any(|alt| groups.iter().any(|g| g.contains(alt.as_str())))
    }

    fn matches_course(&self, course: Option<&str>) -> bool {
        if self.courses.is_empty() {
            return true;
        }
        match course {
            Some(course) => self.courses.iter().any(|alt| course.contains(alt.as_str())),
            None => false,
        }
    }
}

impl FromStr for FilterClause {
    type Err = CelcatError;

    fn from_str(s: &str) -> CelcatResult<Self> {
        let (groups, courses) = s.split_once(SIDE_SEPARATOR).unwrap_or((s, ""));
        let clause = FilterClause {
            groups: alternatives(groups),
            courses: alternatives(courses),
        };

        if clause.groups.is_empty() && clause.courses.is_empty() {
            return Err(CelcatError::InvalidFilter(format!(
                "clause '{s}' has neither groups nor courses"
            )));
        }

        Ok(clause)
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SIDE_SEPARATOR}{}",
            self.groups.join(","),
            self.courses.join(",")
        )
    }
}

/// A disjunction of clauses. The empty expression accepts every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    pub clauses: Vec<FilterClause>,
}

impl FilterExpr {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        FilterExpr { clauses }
    }

    /// Expression equivalent to the `-g` / `-c` flag pair: a single clause,
    /// or the empty expression when both lists are empty.
    pub fn from_legacy(groups: &[String], courses: &[String]) -> Self {
        let clause = FilterClause::new(
            groups.iter().flat_map(|g| alternatives(g)),
            courses.iter().flat_map(|c| alternatives(c)),
        );

        if clause.groups.is_empty() && clause.courses.is_empty() {
            FilterExpr::default()
        } else {
            FilterExpr::new(vec![clause])
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, groups: &[String], course: Option<&str>) -> bool {
        self.is_empty() || self.clauses.iter().any(|c| c.matches(groups, course))
    }
}

impl FromStr for FilterExpr {
    type Err = CelcatError;

    fn from_str(s: &str) -> CelcatResult<Self> {
        if s.trim().is_empty() {
            return Ok(FilterExpr::default());
        }

        let clauses = s
            .split(CLAUSE_SEPARATOR)
            .map(FilterClause::from_str)
            .collect::<CelcatResult<Vec<FilterClause>>>()?;

        Ok(FilterExpr { clauses })
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, "{CLAUSE_SEPARATOR}")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Split a comma-separated list, dropping blank entries
fn alternatives(s: &str) -> Vec<String> {
    s.split(ALTERNATIVE_SEPARATOR)
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn tpa_filter() -> FilterExpr {
        FilterExpr::new(vec![FilterClause::new(
            ["TPA31", "TPA32"],
            ["Info", "Logique"],
        )])
    }

    #[test]
    fn test_clause_matches_substrings() {
        let filter = tpa_filter();
        assert!(filter.matches(&groups(&["TPA31-G1"]), Some("Logique avancée")));
    }

    #[test]
    fn test_clause_rejects_other_group() {
        let filter = tpa_filter();
        assert!(!filter.matches(&groups(&["TPA41"]), Some("Logique avancée")));
    }

    #[test]
    fn test_clause_rejects_other_course() {
        let filter = tpa_filter();
        assert!(!filter.matches(&groups(&["TPA32"]), Some("Anglais")));
    }

    #[test]
    fn test_course_required_when_filtering_courses() {
        let filter = tpa_filter();
        assert!(!filter.matches(&groups(&["TPA31"]), None));
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = FilterExpr::default();
        assert!(filter.matches(&[], Some("Anglais")));
        assert!(filter.matches(&groups(&["X"]), None));
    }

    #[test]
    fn test_any_clause_matches() {
        let filter: FilterExpr = "TPA31:Info+TPB:Anglais".parse().unwrap();
        assert!(filter.matches(&groups(&["TPB2"]), Some("Anglais S5")));
        assert!(filter.matches(&groups(&["TPA31"]), Some("Info")));
        assert!(!filter.matches(&groups(&["TPB2"]), Some("Info")));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let filter = tpa_filter();
        let event_groups = groups(&["TPA32"]);
        let first = filter.matches(&event_groups, Some("Info 3"));
        let second = filter.matches(&event_groups, Some("Info 3"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_grammar() {
        let filter: FilterExpr = "TPA31, TPA32:Info,Logique+TPB:".parse().unwrap();
        assert_eq!(
            filter,
            FilterExpr::new(vec![
                FilterClause::new(["TPA31", "TPA32"], ["Info", "Logique"]),
                FilterClause::new(["TPB"], Vec::<String>::new()),
            ])
        );
    }

    #[test]
    fn test_parse_course_only_clause() {
        let filter: FilterExpr = ":Info".parse().unwrap();
        assert!(filter.matches(&[], Some("Info 3")));
        assert!(!filter.matches(&groups(&["TPA31"]), Some("Anglais")));
    }

    #[test]
    fn test_parse_empty_string_is_accept_all() {
        let filter: FilterExpr = "  ".parse().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_clause() {
        let err = "TPA31:Info+:".parse::<FilterExpr>().unwrap_err();
        assert!(matches!(err, CelcatError::InvalidFilter(_)), "Unexpected error: {err}");
    }

    #[test]
    fn test_display_round_trips_grammar() {
        let text = "TPA31,TPA32:Info+:Anglais";
        let filter: FilterExpr = text.parse().unwrap();
        assert_eq!(filter.to_string(), text);
    }

    #[test]
    fn test_from_legacy() {
        let filter = FilterExpr::from_legacy(&groups(&["TP11,TP12"]), &[]);
        assert_eq!(
            filter,
            FilterExpr::new(vec![FilterClause::new(["TP11", "TP12"], Vec::<String>::new())])
        );
        assert!(filter.matches(&groups(&["EDG1RTP12"]), None));

        assert!(FilterExpr::from_legacy(&[], &[]).is_empty());
    }
}
