use serde::{Deserialize, Serialize};

/// Label rendered wherever a score could not be computed.
pub const EMPTY_SCORE_LABEL: &str = "-";

/// Methodology used to quantify a risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    FineKinney,
    LMatrix,
}

impl ScoringMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FineKinney => "Fine-Kinney",
            Self::LMatrix => "L Tipi Matris (5x5)",
        }
    }
}

/// Raw Fine-Kinney inputs as entered by the assessor.
///
/// Every field is optional: a partially filled form must never produce a
/// partial product, so scoring yields `None` until all three are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinneyInputs {
    pub probability: Option<f64>,
    pub frequency: Option<f64>,
    pub severity: Option<i32>,
}

impl KinneyInputs {
    pub const fn unset() -> Self {
        Self {
            probability: None,
            frequency: None,
            severity: None,
        }
    }

    pub fn score(&self) -> Option<i64> {
        fine_kinney_score(self.probability, self.frequency, self.severity)
    }
}

/// Raw L-Matrix inputs on the 1-5 grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixInputs {
    pub probability: Option<u8>,
    pub severity: Option<u8>,
}

impl MatrixInputs {
    pub const fn unset() -> Self {
        Self {
            probability: None,
            severity: None,
        }
    }

    /// Snap out-of-range entries back onto the 1-5 grid.
    pub fn normalized(self) -> Self {
        Self {
            probability: self.probability.map(|value| value.clamp(1, 5)),
            severity: self.severity.map(|value| value.clamp(1, 5)),
        }
    }

    pub fn score(&self) -> Option<u8> {
        l_matrix_score(self.probability, self.severity)
    }
}

/// Fine-Kinney score: `floor(P x F x S)` when all inputs are present.
pub fn fine_kinney_score(
    probability: Option<f64>,
    frequency: Option<f64>,
    severity: Option<i32>,
) -> Option<i64> {
    match (probability, frequency, severity) {
        (Some(p), Some(f), Some(s)) => Some((p * f * f64::from(s)).floor() as i64),
        _ => None,
    }
}

/// L-Matrix score: `P x S` on the 5x5 grid when both inputs are present.
pub fn l_matrix_score(probability: Option<u8>, severity: Option<u8>) -> Option<u8> {
    match (probability, severity) {
        (Some(p), Some(s)) => Some(p.saturating_mul(s)),
        _ => None,
    }
}

/// Fine-Kinney severity band. Thresholds are lower-bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KinneyBand {
    Insignificant,
    Possible,
    Important,
    Substantial,
    Intolerable,
}

impl KinneyBand {
    pub fn from_score(score: i64) -> Self {
        match score {
            i64::MIN..=19 => Self::Insignificant,
            20..=69 => Self::Possible,
            70..=199 => Self::Important,
            200..=399 => Self::Substantial,
            _ => Self::Intolerable,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Insignificant => "Önemsiz",
            Self::Possible => "Olası",
            Self::Important => "Önemli",
            Self::Substantial => "Esaslı",
            Self::Intolerable => "Tolerans gösterilemez",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Insignificant => "success",
            Self::Possible => "info",
            Self::Important => "warning",
            Self::Substantial => "danger",
            Self::Intolerable => "dark",
        }
    }
}

/// L-Matrix severity band over the 1-25 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixBand {
    Insignificant,
    Low,
    Medium,
    Important,
    Intolerable,
}

impl MatrixBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Insignificant,
            3..=5 => Self::Low,
            6..=11 => Self::Medium,
            12..=19 => Self::Important,
            _ => Self::Intolerable,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Insignificant => "Önemsiz",
            Self::Low => "Düşük",
            Self::Medium => "Orta",
            Self::Important => "Önemli",
            Self::Intolerable => "Tolerans gösterilemez",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Insignificant => "success",
            Self::Low => "info",
            Self::Medium => "warning",
            Self::Important => "danger",
            Self::Intolerable => "dark",
        }
    }
}

/// Human readable label for an optional Fine-Kinney score.
pub fn kinney_label(score: Option<i64>) -> &'static str {
    score.map_or(EMPTY_SCORE_LABEL, |value| {
        KinneyBand::from_score(value).label()
    })
}

/// Human readable label for an optional L-Matrix score.
pub fn matrix_label(score: Option<u8>) -> &'static str {
    score.map_or(EMPTY_SCORE_LABEL, |value| {
        MatrixBand::from_score(value).label()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinney_requires_all_three_inputs() {
        assert_eq!(fine_kinney_score(None, None, None), None);
        assert_eq!(fine_kinney_score(Some(3.0), Some(6.0), None), None);
        assert_eq!(fine_kinney_score(Some(3.0), None, Some(15)), None);
        assert_eq!(fine_kinney_score(None, Some(6.0), Some(15)), None);
    }

    #[test]
    fn kinney_floors_the_product() {
        assert_eq!(fine_kinney_score(Some(0.5), Some(2.5), Some(3)), Some(3));
        assert_eq!(fine_kinney_score(Some(3.0), Some(6.0), Some(15)), Some(270));
    }

    #[test]
    fn kinney_bands_are_lower_bound_inclusive() {
        assert_eq!(KinneyBand::from_score(19), KinneyBand::Insignificant);
        assert_eq!(KinneyBand::from_score(20), KinneyBand::Possible);
        assert_eq!(KinneyBand::from_score(69), KinneyBand::Possible);
        assert_eq!(KinneyBand::from_score(70), KinneyBand::Important);
        assert_eq!(KinneyBand::from_score(200), KinneyBand::Substantial);
        assert_eq!(KinneyBand::from_score(399), KinneyBand::Substantial);
        assert_eq!(KinneyBand::from_score(400), KinneyBand::Intolerable);
    }

    #[test]
    fn matrix_requires_both_inputs() {
        assert_eq!(l_matrix_score(Some(4), None), None);
        assert_eq!(l_matrix_score(None, Some(5)), None);
        assert_eq!(l_matrix_score(Some(4), Some(5)), Some(20));
    }

    #[test]
    fn matrix_bands_are_lower_bound_inclusive() {
        assert_eq!(MatrixBand::from_score(2), MatrixBand::Insignificant);
        assert_eq!(MatrixBand::from_score(3), MatrixBand::Low);
        assert_eq!(MatrixBand::from_score(5), MatrixBand::Low);
        assert_eq!(MatrixBand::from_score(6), MatrixBand::Medium);
        assert_eq!(MatrixBand::from_score(12), MatrixBand::Important);
        assert_eq!(MatrixBand::from_score(19), MatrixBand::Important);
        assert_eq!(MatrixBand::from_score(20), MatrixBand::Intolerable);
        assert_eq!(MatrixBand::from_score(25), MatrixBand::Intolerable);
    }

    #[test]
    fn normalization_clamps_to_grid() {
        let inputs = MatrixInputs {
            probability: Some(0),
            severity: Some(9),
        }
        .normalized();
        assert_eq!(inputs.probability, Some(1));
        assert_eq!(inputs.severity, Some(5));
    }

    #[test]
    fn missing_scores_render_as_dash() {
        assert_eq!(kinney_label(None), EMPTY_SCORE_LABEL);
        assert_eq!(matrix_label(None), EMPTY_SCORE_LABEL);
        assert_eq!(kinney_label(Some(270)), "Esaslı");
        assert_eq!(matrix_label(Some(20)), "Tolerans gösterilemez");
    }
}
