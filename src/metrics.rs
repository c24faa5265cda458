use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errors produced by the evaluation metrics engine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvalError {
    /// The pair sequence was empty after upstream filtering.
    #[error("at least one (true, predicted) label pair is required")]
    InsufficientInput,
}

/// Confusion tallies for a single label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelCounts {
    /// Samples whose true and predicted label both equal this label.
    pub true_positive: u64,
    /// Samples predicted as this label whose true label differs.
    pub false_positive: u64,
    /// Samples truly of this label that were predicted as something else.
    pub false_negative: u64,
}

impl LabelCounts {
    /// Precision for this label. Labels never predicted have precision 0.0,
    /// not undefined.
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positive + self.false_positive;
        if denominator == 0 {
            0.0
        } else {
            self.true_positive as f64 / denominator as f64
        }
    }

    /// Recall for this label, with the same explicit zero-division policy as
    /// [`precision`](Self::precision).
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positive + self.false_negative;
        if denominator == 0 {
            0.0
        } else {
            self.true_positive as f64 / denominator as f64
        }
    }

    /// Harmonic mean of precision and recall; 0.0 when both are zero.
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }
}

/// Per-label confusion accounting over one evaluation run.
///
/// The label set is the union of all true and predicted labels, held in a
/// `BTreeMap` so iteration order is lexicographic and deterministic. Every
/// observed label is present, possibly with all-zero counts on one side.
///
/// # Example
/// ```rust
/// use polarity::metrics::ConfusionCounts;
///
/// let pairs = vec![("positive", "positive"), ("negative", "positive")];
/// let counts = ConfusionCounts::from_pairs(&pairs);
/// assert_eq!(counts.get("positive").true_positive, 1);
/// assert_eq!(counts.get("positive").false_positive, 1);
/// assert_eq!(counts.get("negative").false_negative, 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfusionCounts {
    counts: BTreeMap<String, LabelCounts>,
}

impl ConfusionCounts {
    /// Builds confusion counts from an ordered sequence of
    /// `(true_label, predicted_label)` pairs in a single linear pass.
    ///
    /// Accumulation is commutative, so pair order never affects the result.
    pub fn from_pairs<T, P>(pairs: &[(T, P)]) -> Self
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        let mut counts: BTreeMap<String, LabelCounts> = BTreeMap::new();
        for (y_true, y_pred) in pairs {
            let y_true = y_true.as_ref();
            let y_pred = y_pred.as_ref();
            if y_true == y_pred {
                counts.entry(y_true.to_string()).or_default().true_positive += 1;
            } else {
                counts.entry(y_true.to_string()).or_default().false_negative += 1;
                counts.entry(y_pred.to_string()).or_default().false_positive += 1;
            }
        }
        Self { counts }
    }

    /// Returns the counts for a label, all-zero if the label was never seen.
    pub fn get(&self, label: &str) -> LabelCounts {
        self.counts.get(label).copied().unwrap_or_default()
    }

    /// Labels observed in this run, in ascending lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Number of distinct labels observed.
    pub fn label_count(&self) -> usize {
        self.counts.len()
    }

    /// Pooled counts across all labels, used for micro-averaged metrics.
    ///
    /// Every mismatched pair contributes exactly one false positive and one
    /// false negative somewhere, so the pooled totals always satisfy
    /// `false_positive == false_negative`.
    pub fn totals(&self) -> LabelCounts {
        let mut totals = LabelCounts::default();
        for counts in self.counts.values() {
            totals.true_positive += counts.true_positive;
            totals.false_positive += counts.false_positive;
            totals.false_negative += counts.false_negative;
        }
        totals
    }

    /// Derives the full metrics report from these counts.
    ///
    /// Macro F1 averages the unrounded per-label F1 values; the per-label map
    /// in the report carries the rounded ones. Micro F1 is derived from the
    /// pooled totals, which under this accounting scheme makes it exactly
    /// equal to accuracy.
    pub fn report(&self) -> MetricsReport {
        let mut per_label_f1 = BTreeMap::new();
        let mut f1_sum = 0.0;
        for (label, counts) in &self.counts {
            let f1 = counts.f1();
            f1_sum += f1;
            per_label_f1.insert(label.clone(), round6(f1));
        }

        let f1_macro = if self.counts.is_empty() {
            0.0
        } else {
            f1_sum / self.counts.len() as f64
        };

        let totals = self.totals();
        let f1_micro = totals.f1();

        let evaluated = totals.true_positive + totals.false_negative;
        let accuracy = if evaluated == 0 {
            0.0
        } else {
            totals.true_positive as f64 / evaluated as f64
        };

        MetricsReport {
            accuracy: round6(accuracy),
            f1_macro: round6(f1_macro),
            f1_micro: round6(f1_micro),
            per_label_f1,
        }
    }
}

/// Aggregate classification metrics for one evaluation run.
///
/// All fields are rounded to 6 decimal places at this boundary; full f64
/// precision is kept internally up to that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub f1_macro: f64,
    pub f1_micro: f64,
    pub per_label_f1: BTreeMap<String, f64>,
}

/// Computes the metrics report for an ordered sequence of
/// `(true_label, predicted_label)` pairs.
///
/// This is a pure function of the input sequence: no side effects, no shared
/// state, total over any non-empty sequence of label strings.
///
/// # Errors
/// [`EvalError::InsufficientInput`] when `pairs` is empty.
///
/// # Example
/// ```rust
/// use polarity::metrics::evaluate_pairs;
///
/// let pairs = vec![("positive", "positive"), ("negative", "negative")];
/// let report = evaluate_pairs(&pairs)?;
/// assert_eq!(report.accuracy, 1.0);
/// assert_eq!(report.f1_macro, 1.0);
/// # Ok::<(), polarity::metrics::EvalError>(())
/// ```
pub fn evaluate_pairs<T, P>(pairs: &[(T, P)]) -> Result<MetricsReport, EvalError>
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    if pairs.is_empty() {
        return Err(EvalError::InsufficientInput);
    }
    Ok(ConfusionCounts::from_pairs(pairs).report())
}

/// Rounds to 6 decimal places, half away from zero.
///
/// The exact rounding mode is a formatting convention rather than a numeric
/// requirement; what matters is that it is applied identically to every
/// reported field.
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(t, p)| (t.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_input_rejected() {
        let pairs: Vec<(&str, &str)> = vec![];
        assert_eq!(evaluate_pairs(&pairs), Err(EvalError::InsufficientInput));
    }

    #[test]
    fn test_single_pair() {
        let report = evaluate_pairs(&[("positive", "positive")]).unwrap();
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.f1_macro, 1.0);
        assert_eq!(report.f1_micro, 1.0);
        assert_eq!(report.per_label_f1["positive"], 1.0);
    }

    #[test]
    fn test_reference_scenario() {
        // tp = {negative: 2, neutral: 0, positive: 2}
        // fp = {positive: 1}, fn = {neutral: 1}
        let pairs = owned(&[
            ("positive", "positive"),
            ("negative", "negative"),
            ("neutral", "positive"),
            ("positive", "positive"),
            ("negative", "negative"),
        ]);
        let counts = ConfusionCounts::from_pairs(&pairs);
        assert_eq!(
            counts.labels().collect::<Vec<_>>(),
            vec!["negative", "neutral", "positive"]
        );
        assert_eq!(counts.get("negative").true_positive, 2);
        assert_eq!(counts.get("neutral").false_negative, 1);
        assert_eq!(counts.get("positive").true_positive, 2);
        assert_eq!(counts.get("positive").false_positive, 1);

        let report = counts.report();
        assert_eq!(report.per_label_f1["negative"], 1.0);
        assert_eq!(report.per_label_f1["neutral"], 0.0);
        assert_eq!(report.per_label_f1["positive"], 0.8);
        assert_eq!(report.f1_macro, 0.6);
        assert_eq!(report.accuracy, 0.8);
        assert_eq!(report.f1_micro, 0.8);
    }

    #[test]
    fn test_perfect_classifier() {
        let pairs = owned(&[("a", "a"), ("b", "b"), ("c", "c"), ("a", "a")]);
        let report = evaluate_pairs(&pairs).unwrap();
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.f1_macro, 1.0);
        assert_eq!(report.f1_micro, 1.0);
        for f1 in report.per_label_f1.values() {
            assert_eq!(*f1, 1.0);
        }
    }

    #[test]
    fn test_never_correct_classifier() {
        let pairs = owned(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let report = evaluate_pairs(&pairs).unwrap();
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.f1_micro, 0.0);
        for f1 in report.per_label_f1.values() {
            assert_eq!(*f1, 0.0);
        }
    }

    #[test]
    fn test_label_only_in_predictions() {
        // "spam" never appears as a true label: recall denominator is zero.
        let counts = ConfusionCounts::from_pairs(&[("ham", "spam"), ("ham", "ham")]);
        let spam = counts.get("spam");
        assert_eq!(spam.true_positive, 0);
        assert_eq!(spam.false_positive, 1);
        assert_eq!(spam.false_negative, 0);
        assert_eq!(spam.precision(), 0.0);
        assert_eq!(spam.recall(), 0.0);
        assert_eq!(spam.f1(), 0.0);
    }

    #[test]
    fn test_label_only_in_truth() {
        // "rare" is never predicted: precision denominator is zero.
        let counts = ConfusionCounts::from_pairs(&[("rare", "common"), ("common", "common")]);
        let rare = counts.get("rare");
        assert_eq!(rare.false_negative, 1);
        assert_eq!(rare.precision(), 0.0);
        assert_eq!(rare.f1(), 0.0);
    }

    #[test]
    fn test_accounting_invariants() {
        let pairs = owned(&[
            ("a", "a"),
            ("a", "b"),
            ("b", "b"),
            ("b", "a"),
            ("c", "a"),
            ("c", "c"),
            ("a", "c"),
        ]);
        let totals = ConfusionCounts::from_pairs(&pairs).totals();
        let n = pairs.len() as u64;
        assert_eq!(totals.true_positive + totals.false_negative, n);
        assert_eq!(totals.true_positive + totals.false_positive, n);
        assert_eq!(totals.false_positive, totals.false_negative);
    }

    #[test]
    fn test_micro_f1_equals_accuracy() {
        let pairs = owned(&[("x", "y"), ("y", "y"), ("z", "x"), ("x", "x"), ("y", "z")]);
        let report = evaluate_pairs(&pairs).unwrap();
        assert!((report.f1_micro - report.accuracy).abs() < 1e-6);
    }

    #[test]
    fn test_order_independence() {
        let pairs = owned(&[("a", "b"), ("b", "b"), ("c", "a"), ("a", "a"), ("b", "c")]);
        let mut reversed = pairs.clone();
        reversed.reverse();
        assert_eq!(
            evaluate_pairs(&pairs).unwrap(),
            evaluate_pairs(&reversed).unwrap()
        );
    }

    #[test]
    fn test_rounding_to_six_decimals() {
        // Two labels, one with F1 = 2/3 = 0.666666...
        let pairs = owned(&[("a", "a"), ("a", "b"), ("b", "b"), ("b", "b")]);
        let counts = ConfusionCounts::from_pairs(&pairs);
        let a = counts.get("a");
        assert!((a.f1() - 2.0 / 3.0).abs() < 1e-12);
        let report = counts.report();
        assert_eq!(report.per_label_f1["a"], 0.666667);
    }

    #[test]
    fn test_round6_boundary_behavior() {
        assert_eq!(round6(1.0 / 3.0), 0.333333);
        assert_eq!(round6(2.0 / 3.0), 0.666667);
        assert_eq!(round6(4.0 / 7.0), 0.571429);
        assert_eq!(round6(1.0), 1.0);
        assert_eq!(round6(0.0), 0.0);
    }

    #[test]
    fn test_report_serialization() {
        let report = evaluate_pairs(&[("pos", "pos"), ("neg", "pos")]).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: MetricsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
