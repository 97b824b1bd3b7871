//! Threshold rules for adrenal/thyroid disorders and chronic kidney disease
//!
//! Both rules are conjunctions of strict comparisons, evaluated independently.
//! A value sitting exactly on a threshold never flags.

use std::fmt;

use serde::Serialize;

use crate::models::RuleInput;

/// Hemoglobin (g/dL) must be below this for the adrenal/thyroid rule
pub const HEMOGLOBIN_THRESHOLD: f64 = 12.0;

/// Stress level must be above this for the adrenal/thyroid rule
pub const STRESS_THRESHOLD: u8 = 7;

/// BMI (kg/m^2) must be above this for the kidney rule
pub const BMI_THRESHOLD: f64 = 30.0;

/// Salt intake (g/day) must be above this for the kidney rule
pub const SALT_THRESHOLD: f64 = 5.0;

/// Abnormal blood pressure, low hemoglobin and high stress
#[must_use]
pub fn adrenal_thyroid_rule(input: &RuleInput) -> bool {
    input.blood_pressure_abnormality == 1
        && input.hemoglobin_level < HEMOGLOBIN_THRESHOLD
        && input.stress_level > STRESS_THRESHOLD
}

/// High BMI, high salt intake and smoking
#[must_use]
pub fn chronic_kidney_rule(input: &RuleInput) -> bool {
    input.bmi > BMI_THRESHOLD && input.salt_intake > SALT_THRESHOLD && input.smoking == 1
}

/// Outcome of both rules for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub adrenal_thyroid: bool,
    pub chronic_kidney: bool,
}

impl Assessment {
    #[must_use]
    pub const fn adrenal_thyroid_likelihood(&self) -> Likelihood {
        Likelihood::from_flag(self.adrenal_thyroid)
    }

    #[must_use]
    pub const fn chronic_kidney_likelihood(&self) -> Likelihood {
        Likelihood::from_flag(self.chronic_kidney)
    }
}

/// `(adrenal_thyroid, chronic_kidney)`
impl From<Assessment> for (bool, bool) {
    fn from(assessment: Assessment) -> Self {
        (assessment.adrenal_thyroid, assessment.chronic_kidney)
    }
}

/// Apply both screening rules
#[must_use]
pub fn evaluate(input: &RuleInput) -> Assessment {
    Assessment {
        adrenal_thyroid: adrenal_thyroid_rule(input),
        chronic_kidney: chronic_kidney_rule(input),
    }
}

/// Display label for a rule flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Likelihood {
    Likely,
    Unlikely,
}

impl Likelihood {
    #[must_use]
    pub const fn from_flag(flag: bool) -> Self {
        if flag { Self::Likely } else { Self::Unlikely }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Likely => "Likely",
            Self::Unlikely => "Unlikely",
        }
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
