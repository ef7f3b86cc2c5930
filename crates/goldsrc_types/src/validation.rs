//! Aggregated results of a semantic validation pass.
//!
//! Validation never stops at the first finding: every [`Problem`] is collected and returned
//! at once inside a [`ValidationError`], which miette renders as a list of related diagnostics.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::name::NameIssue;

/// What is wrong with a single texture.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    /// empty name
    #[error("name is empty")]
    EmptyName,

    /// no terminator
    #[error("name is not NUL-terminated")]
    UnterminatedName,

    /// name contains something other than printable ASCII
    #[error("name contains whitespace or non-printable characters")]
    InvalidCharacters,

    /// misused animation marker
    #[error("leading '{0}' must be followed by a frame character and a base name")]
    #[diagnostic(help("'+' takes 0-9 or a-j, '-' takes 0-9"))]
    InvalidMarker(char),

    /// width is not a multiple of 16
    #[error("width {0} is not a multiple of 16")]
    WidthNotMultipleOf16(u32),

    /// height is not a multiple of 16
    #[error("height {0} is not a multiple of 16")]
    HeightNotMultipleOf16(u32),

    /// some but not all mip offsets are set
    #[error("mip offsets are partially embedded: {0:?}")]
    PartialMipOffsets([u32; 4]),

    /// name seen before
    #[error("name is already used by texture {0}")]
    DuplicateName(usize),
}

impl From<NameIssue> for ProblemKind {
    fn from(issue: NameIssue) -> Self {
        match issue {
            NameIssue::Empty => ProblemKind::EmptyName,
            NameIssue::Unterminated => ProblemKind::UnterminatedName,
            NameIssue::InvalidCharacters => ProblemKind::InvalidCharacters,
            NameIssue::InvalidMarker(marker) => ProblemKind::InvalidMarker(marker),
        }
    }
}

/// A single finding, locating the offending texture by index and (when readable) by name.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("texture {index}{}: {kind}", Located(.name))]
pub struct Problem {
    /// Position of the texture in its container
    pub index: usize,
    /// Name of the texture, absent when empty
    pub name: Option<String>,
    /// What is wrong
    pub kind: ProblemKind,
}

struct Located<'a>(&'a Option<String>);

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " ({name})"),
            None => Ok(()),
        }
    }
}

impl Problem {
    /// A problem for the texture at `index`
    pub fn new(index: usize, name: Option<String>, kind: ProblemKind) -> Problem {
        Problem { index, name, kind }
    }
}

/// Every problem found by one validation pass.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("found {} validation problem(s)", .problems.len())]
pub struct ValidationError {
    /// The individual findings, in discovery order
    #[related]
    pub problems: Vec<Problem>,
}

impl ValidationError {
    /// `Ok` when nothing was found, otherwise the aggregate.
    pub fn check(problems: Vec<Problem>) -> Result<(), ValidationError> {
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems })
        }
    }

    /// Combine two passes into one error
    pub fn merge(mut self, other: ValidationError) -> ValidationError {
        self.problems.extend(other.problems);
        self
    }

    /// Number of findings
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Whether there are no findings
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::name::NameIssue;
    use crate::validation::{Problem, ProblemKind, ValidationError};

    #[test]
    fn empty_list_is_ok() {
        assert_eq!(ValidationError::check(Vec::new()), Ok(()));
    }

    #[test]
    fn problems_are_kept_in_order() {
        let problems = vec![
            Problem::new(0, Some("wall".into()), ProblemKind::WidthNotMultipleOf16(100)),
            Problem::new(3, None, ProblemKind::EmptyName),
        ];

        let error = ValidationError::check(problems.clone()).unwrap_err();
        assert_eq!(error.len(), 2);
        assert_eq!(error.problems, problems);
        assert_eq!(error.to_string(), "found 2 validation problem(s)");
    }

    #[test]
    fn merge_appends_in_order() {
        let first = ValidationError::check(vec![Problem::new(2, None, ProblemKind::EmptyName)]);
        let second = ValidationError::check(vec![
            Problem::new(0, Some("wide".into()), ProblemKind::WidthNotMultipleOf16(100)),
            Problem::new(1, Some("tall".into()), ProblemKind::HeightNotMultipleOf16(8)),
        ]);

        let merged = first.unwrap_err().merge(second.unwrap_err());
        let indices: Vec<usize> = merged.problems.iter().map(|p| p.index).collect();
        assert_eq!(indices, [2, 0, 1]);
        assert_eq!(merged.to_string(), "found 3 validation problem(s)");
    }

    #[test]
    fn problem_display() {
        assert_eq!(
            Problem::new(1, Some("wall".into()), ProblemKind::WidthNotMultipleOf16(100))
                .to_string(),
            "texture 1 (wall): width 100 is not a multiple of 16"
        );
        assert_eq!(
            Problem::new(4, None, ProblemKind::EmptyName).to_string(),
            "texture 4: name is empty"
        );
    }

    #[test]
    fn name_issue_conversion() {
        assert_eq!(
            ProblemKind::from(NameIssue::InvalidMarker('+')),
            ProblemKind::InvalidMarker('+')
        );
        assert_eq!(
            ProblemKind::from(NameIssue::Unterminated),
            ProblemKind::UnterminatedName
        );
    }
}
