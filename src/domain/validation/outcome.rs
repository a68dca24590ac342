//! Validation outcome and the strict/lenient policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::modules::ModuleId;

/// Content that cannot be repaired into something renderable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FatalIssue {
    UnresolvedTemplateToken { location: String, token: String },
    LeakedModuleId { location: String, module_id: ModuleId },
}

impl std::fmt::Display for FatalIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FatalIssue::UnresolvedTemplateToken { location, token } => {
                write!(f, "unresolved template token {} in {}", token, location)
            }
            FatalIssue::LeakedModuleId { location, module_id } => {
                write!(f, "internal module id {} in {}", module_id, location)
            }
        }
    }
}

/// How callers treat fatal issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Any fatal issue rejects the bundle.
    Strict,
    /// Fatal issues are reported but the corrected bundle is still used.
    #[default]
    Lenient,
}

impl FromStr for ValidationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "lenient" => Ok(ValidationMode::Lenient),
            other => Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown validation mode '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    #[error("Bundle rejected with {} fatal issue(s)", .issues.len())]
    Rejected { issues: Vec<FatalIssue> },
}

impl From<BundleError> for DomainError {
    fn from(err: BundleError) -> Self {
        let message = err.to_string();
        match err {
            BundleError::Rejected { issues } => issues.iter().enumerate().fold(
                DomainError::new(ErrorCode::BundleRejected, message),
                |e, (i, issue)| e.with_detail(format!("issue_{}", i), issue.to_string()),
            ),
        }
    }
}

/// Result of one validator run. `adjustments` holds only notes added by this run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub fatal_errors: Vec<FatalIssue>,
    pub adjustments: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.fatal_errors.is_empty()
    }

    /// Applies the mode: strict rejects on any fatal issue, lenient never does.
    pub fn into_result(self, mode: ValidationMode) -> Result<ValidationOutcome, BundleError> {
        match mode {
            ValidationMode::Strict if !self.fatal_errors.is_empty() => Err(BundleError::Rejected {
                issues: self.fatal_errors,
            }),
            _ => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_fatal() -> ValidationOutcome {
        ValidationOutcome {
            fatal_errors: vec![FatalIssue::UnresolvedTemplateToken {
                location: "narratives[0].body".to_string(),
                token: "{{name}}".to_string(),
            }],
            adjustments: vec![],
        }
    }

    #[test]
    fn strict_rejects_fatal_issues() {
        let err = with_fatal().into_result(ValidationMode::Strict).unwrap_err();
        assert_eq!(err.to_string(), "Bundle rejected with 1 fatal issue(s)");
    }

    #[test]
    fn lenient_keeps_outcome() {
        let outcome = with_fatal().into_result(ValidationMode::Lenient).unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn strict_accepts_clean_outcome() {
        assert!(ValidationOutcome::default().into_result(ValidationMode::Strict).is_ok());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("STRICT".parse::<ValidationMode>().unwrap(), ValidationMode::Strict);
        assert!("loose".parse::<ValidationMode>().is_err());
    }

    #[test]
    fn rejection_converts_to_domain_error() {
        let err: DomainError = with_fatal().into_result(ValidationMode::Strict).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::BundleRejected);
        assert!(err.details.contains_key("issue_0"));
    }

    #[test]
    fn fatal_issue_serializes_with_kind_tag() {
        let issue = FatalIssue::LeakedModuleId {
            location: "narratives[1].body".to_string(),
            module_id: ModuleId::GutHealth,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "leaked_module_id");
        assert_eq!(json["module_id"], "gut_health");
    }
}
