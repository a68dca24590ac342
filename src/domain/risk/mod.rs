//! Risk module - Threshold and keyword scans that raise severity flags.

mod flags;

pub use flags::{
    flag_for, FlagSeverity, RiskCategory, RiskFlag, RiskFlagBuilder, CARDIO_KEYWORDS,
    DIABETES_KEYWORDS, NORMAL_LAB_WEIGHT, THYROID_KEYWORDS,
};
