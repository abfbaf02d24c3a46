use std::hash::Hash;

/// Invert a map by swapping keys and values
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Hash + Eq,
    V: Hash + Eq,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// Index of the largest value in each row of a row-major `[rows, n_classes]` buffer.
///
/// Ties resolve to the lowest index.
pub fn argmax_rows(values: &[f32], n_classes: usize) -> Vec<usize> {
    values
        .chunks(n_classes)
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |(best, max), (index, value)| {
                    if *value > max {
                        (index, *value)
                    } else {
                        (best, max)
                    }
                })
                .0
        })
        .collect()
}

/// Human readable sentiment label for a class id
pub fn sentiment_label(class_id: usize) -> &'static str {
    match class_id {
        0 => "negative",
        _ => "positive",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn inverts_maps() {
        let original = HashMap::from([("the", 1), ("and", 2)]);

        let inverted: HashMap<usize, &str> = invert_map(original);

        assert_eq!(inverted, HashMap::from([(1, "the"), (2, "and")]));
    }

    #[test]
    fn picks_the_largest_logit_per_row() {
        let logits = [0.1, 2.5, 3.0, -1.0, -0.5, -0.25];

        assert_eq!(argmax_rows(&logits, 2), vec![1, 0, 1]);
    }

    #[test]
    fn breaks_ties_towards_the_lowest_index() {
        let logits = [0.7, 0.7, -2.0, -2.0];

        assert_eq!(argmax_rows(&logits, 2), vec![0, 0]);
    }

    #[test]
    fn labels_sentiment_classes() {
        assert_eq!(sentiment_label(0), "negative");
        assert_eq!(sentiment_label(1), "positive");
    }
}
