//! Feature Importance Ranking

use serde::Serialize;

/// Number of features shown in the importance chart
pub const DEFAULT_TOP_N: usize = 10;

/// One entry of the importance ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub name: String,
    pub importance: f64,
}

/// Rank features by descending weight and keep the first `top_n`.
///
/// The sort is stable, so equal weights keep feature list order.
pub fn rank_importances<S: AsRef<str>>(
    names: &[S],
    weights: &[f64],
    top_n: usize,
) -> Vec<RankedFeature> {
    let mut order: Vec<usize> = (0..names.len().min(weights.len())).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

    order
        .into_iter()
        .take(top_n)
        .map(|idx| RankedFeature {
            name: names[idx].as_ref().to_string(),
            importance: weights[idx],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(ranked: &[RankedFeature]) -> Vec<(&str, f64)> {
        ranked
            .iter()
            .map(|r| (r.name.as_str(), r.importance))
            .collect()
    }

    #[test]
    fn test_descending_order() {
        let ranked = rank_importances(&["A", "B", "C"], &[0.5, 0.3, 0.2], DEFAULT_TOP_N);
        assert_eq!(pairs(&ranked), vec![("A", 0.5), ("B", 0.3), ("C", 0.2)]);
    }

    #[test]
    fn test_unsorted_input() {
        let ranked = rank_importances(&["A", "B", "C"], &[0.1, 0.6, 0.3], DEFAULT_TOP_N);
        assert_eq!(pairs(&ranked), vec![("B", 0.6), ("C", 0.3), ("A", 0.1)]);
    }

    #[test]
    fn test_ties_keep_spec_order() {
        let ranked = rank_importances(&["A", "B", "C", "D"], &[0.2, 0.4, 0.2, 0.2], DEFAULT_TOP_N);
        assert_eq!(
            pairs(&ranked),
            vec![("B", 0.4), ("A", 0.2), ("C", 0.2), ("D", 0.2)]
        );
    }

    #[test]
    fn test_truncates_to_top_n() {
        let names: Vec<String> = (0..25).map(|i| format!("f{i}")).collect();
        let weights: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let ranked = rank_importances(&names, &weights, DEFAULT_TOP_N);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].name, "f24");
        assert_eq!(ranked[9].name, "f15");
    }

    #[test]
    fn test_fewer_features_than_top_n() {
        let ranked = rank_importances(&["only"], &[1.0], DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_sorted_and_stable(weights in proptest::collection::vec(0u8..5, 0..40)) {
            let weights: Vec<f64> = weights.into_iter().map(|w| w as f64 / 4.0).collect();
            let names: Vec<String> = (0..weights.len()).map(|i| format!("{i:03}")).collect();
            let ranked = rank_importances(&names, &weights, DEFAULT_TOP_N);

            prop_assert_eq!(ranked.len(), weights.len().min(DEFAULT_TOP_N));
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].importance >= pair[1].importance);
                if pair[0].importance == pair[1].importance {
                    prop_assert!(pair[0].name < pair[1].name);
                }
            }
        }
    }
}
