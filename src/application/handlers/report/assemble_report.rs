//! AssembleReport - Command handler that turns a profile and tier into a
//! validated content bundle.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::bundle::ContentBundle;
use crate::domain::engine::RuleEngine;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::meal_plan::MealPlanGenerator;
use crate::domain::modules::ModuleId;
use crate::domain::profile::{Tier, TierEntitlements, UserProfile};
use crate::domain::supplements::SupplementRecommender;
use crate::domain::validation::{
    BundleError, BundleValidator, BundleValidatorConfig, ValidationMode, ValidationOutcome,
};
use crate::ports::{NarrativeError, NarrativeWriter};

/// Command to assemble one report.
#[derive(Debug, Clone)]
pub struct AssembleReportCommand {
    pub profile: UserProfile,
    pub tier: Tier,
    pub add_ons: Vec<String>,
}

/// Validated bundle plus what the validator did to it.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledReport {
    pub bundle: ContentBundle,
    pub outcome: ValidationOutcome,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] ValidationError),

    #[error(transparent)]
    Narrative(#[from] NarrativeError),

    #[error(transparent)]
    Rejected(#[from] BundleError),
}

impl From<ReportError> for DomainError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidProfile(e) => e.into(),
            ReportError::Narrative(e) => DomainError::new(ErrorCode::InternalError, e.to_string()),
            ReportError::Rejected(e) => e.into(),
        }
    }
}

/// Handler settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssembleReportSettings {
    /// Upper bound on generated meal plan days, below the tier entitlement.
    pub max_meal_plan_days: u8,
    pub validator: BundleValidatorConfig,
    pub mode: ValidationMode,
}

impl Default for AssembleReportSettings {
    fn default() -> Self {
        Self {
            max_meal_plan_days: 28,
            validator: BundleValidatorConfig::default(),
            mode: ValidationMode::Lenient,
        }
    }
}

/// Handler for assembling a report.
pub struct AssembleReportHandler {
    writer: Arc<dyn NarrativeWriter>,
    validator: BundleValidator,
    settings: AssembleReportSettings,
}

impl AssembleReportHandler {
    pub fn new(writer: Arc<dyn NarrativeWriter>, settings: AssembleReportSettings) -> Self {
        Self {
            writer,
            validator: BundleValidator::new(settings.validator),
            settings,
        }
    }

    pub fn handle(&self, cmd: AssembleReportCommand) -> Result<AssembledReport, ReportError> {
        let AssembleReportCommand { profile, tier, add_ons } = cmd;
        profile.validate()?;

        let output = RuleEngine::evaluate(&profile, tier);
        let entitlements = TierEntitlements::for_tier(tier);

        let wants_supplements = entitlements.supplement_guide
            && output.active_modules.contains(&ModuleId::SupplementGuide);
        let supplements = if wants_supplements {
            SupplementRecommender::recommend(&profile, &output.risk_flags, &output.active_modules)
        } else {
            Vec::new()
        };

        let days = entitlements.meal_plan_days.min(self.settings.max_meal_plan_days);
        let meal_plan = if days > 0 && output.active_modules.contains(&ModuleId::MealPlan) {
            MealPlanGenerator::generate(&profile, days)
        } else {
            Vec::new()
        };

        let narratives = output
            .narrative_hints
            .iter()
            .map(|hint| self.writer.write(hint, &profile))
            .collect::<Result<Vec<_>, _>>()?;

        let mut bundle = ContentBundle::assemble(profile, tier, output)
            .with_add_ons(add_ons)
            .with_narratives(narratives)
            .with_meal_plan(meal_plan)
            .with_supplements(supplements);

        let limit = entitlements.lab_test_limit(bundle.lab_test_priority.len());
        bundle.lab_test_priority.truncate(limit);

        let outcome = self.validator.validate(&mut bundle).into_result(self.settings.mode)?;

        info!(
            profile_id = %bundle.profile.id,
            tier = %tier,
            modules = bundle.active_modules.len(),
            meal_plan_days = bundle.meal_plan.len(),
            adjustments = outcome.adjustments.len(),
            "Report assembled"
        );

        Ok(AssembledReport { bundle, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TemplateNarrativeWriter;
    use crate::domain::bundle::{BundleState, NarrativeSection};
    use crate::domain::narrative::NarrativeHint;
    use crate::domain::profile::Gender;

    struct LeakyWriter;

    impl NarrativeWriter for LeakyWriter {
        fn write(
            &self,
            hint: &NarrativeHint,
            _profile: &UserProfile,
        ) -> Result<NarrativeSection, NarrativeError> {
            Ok(NarrativeSection::new(hint.section, "Title", "Hello {{first_name}}."))
        }
    }

    struct FailingWriter;

    impl NarrativeWriter for FailingWriter {
        fn write(
            &self,
            hint: &NarrativeHint,
            _profile: &UserProfile,
        ) -> Result<NarrativeSection, NarrativeError> {
            Err(NarrativeError::MissingTemplate(hint.section))
        }
    }

    fn handler(mode: ValidationMode) -> AssembleReportHandler {
        AssembleReportHandler::new(
            Arc::new(TemplateNarrativeWriter::new()),
            AssembleReportSettings {
                mode,
                ..AssembleReportSettings::default()
            },
        )
    }

    fn command(tier: Tier) -> AssembleReportCommand {
        AssembleReportCommand {
            profile: UserProfile::new(45, Gender::Female, 165.0, 78.0)
                .with_scores(35, 72, 40, 45)
                .with_conditions(&["Hypothyroidism"]),
            tier,
            add_ons: vec!["printed_copy".to_string()],
        }
    }

    #[test]
    fn free_tier_has_no_meal_plan_or_supplements() {
        let report = handler(ValidationMode::Strict).handle(command(Tier::Free)).unwrap();
        assert!(report.bundle.meal_plan.is_empty());
        assert!(report.bundle.supplements.is_empty());
        assert!(report.bundle.lab_test_priority.len() <= 5);
        assert_eq!(report.bundle.state, BundleState::Validated);
    }

    #[test]
    fn meal_plan_length_follows_entitlement() {
        let essential = handler(ValidationMode::Strict).handle(command(Tier::Essential)).unwrap();
        let premium = handler(ValidationMode::Strict).handle(command(Tier::Premium)).unwrap();
        assert_eq!(essential.bundle.meal_plan.len(), 7);
        assert_eq!(premium.bundle.meal_plan.len(), 14);
        assert!(!premium.bundle.supplements.is_empty());
    }

    #[test]
    fn settings_cap_meal_plan_days() {
        let h = AssembleReportHandler::new(
            Arc::new(TemplateNarrativeWriter::new()),
            AssembleReportSettings {
                max_meal_plan_days: 3,
                ..AssembleReportSettings::default()
            },
        );
        let report = h.handle(command(Tier::Coaching)).unwrap();
        assert_eq!(report.bundle.meal_plan.len(), 3);
    }

    #[test]
    fn narratives_cover_every_module() {
        let report = handler(ValidationMode::Strict).handle(command(Tier::Premium)).unwrap();
        let sections: Vec<ModuleId> = report.bundle.narratives.iter().map(|n| n.module).collect();
        assert_eq!(sections, report.bundle.active_modules);
        assert_eq!(report.bundle.add_ons, vec!["printed_copy"]);
    }

    #[test]
    fn strict_mode_rejects_template_leaks() {
        let h = AssembleReportHandler::new(
            Arc::new(LeakyWriter),
            AssembleReportSettings {
                mode: ValidationMode::Strict,
                ..AssembleReportSettings::default()
            },
        );
        assert!(matches!(h.handle(command(Tier::Free)), Err(ReportError::Rejected(_))));
    }

    #[test]
    fn lenient_mode_returns_cleaned_bundle() {
        let h =
            AssembleReportHandler::new(Arc::new(LeakyWriter), AssembleReportSettings::default());
        let report = h.handle(command(Tier::Free)).unwrap();
        assert!(!report.outcome.fatal_errors.is_empty());
        assert!(report.bundle.narratives.iter().all(|n| !n.body.contains('{')));
    }

    #[test]
    fn writer_failure_propagates() {
        let h =
            AssembleReportHandler::new(Arc::new(FailingWriter), AssembleReportSettings::default());
        assert!(matches!(h.handle(command(Tier::Free)), Err(ReportError::Narrative(_))));
    }

    #[test]
    fn invalid_profile_is_rejected_before_evaluation() {
        let mut cmd = command(Tier::Free);
        cmd.profile.age = 0;
        let err = handler(ValidationMode::Lenient).handle(cmd).unwrap_err();
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::OutOfRange);
    }
}
