//! Fixed classification policy: class list, confidence threshold, and the
//! user-facing strings derived from them.

/// Class labels in model output order. The arg-max index selects from this list.
pub const CLASSES: [&str; 2] = ["Cancer", "Non Cancer"];

/// Confidence (percent) above which a prediction is considered reliable.
/// The comparison is strictly greater-than: exactly 99.0 is under threshold.
pub const CONFIDENCE_THRESHOLD: f32 = 99.0;

pub const CANCER_SUGGESTION: &str = "Immediate medical consultation advised.";
pub const NON_CANCER_SUGGESTION: &str = "Medical consultation not necessary.";

pub const ABOVE_THRESHOLD_MESSAGE: &str = "Model is predicted successfully.";
pub const UNDER_THRESHOLD_MESSAGE: &str =
    "Model is predicted successfully but under threshold. Please use the correct picture";

/// Suggestion text for a predicted label. Only the two labels in [`CLASSES`]
/// can reach this point.
pub fn suggestion_for(label: &str) -> &'static str {
    if label == CLASSES[0] {
        CANCER_SUGGESTION
    } else {
        NON_CANCER_SUGGESTION
    }
}

/// Response message for a confidence score in percent.
pub fn message_for(confidence_score: f32) -> &'static str {
    if confidence_score > CONFIDENCE_THRESHOLD {
        ABOVE_THRESHOLD_MESSAGE
    } else {
        UNDER_THRESHOLD_MESSAGE
    }
}
