use std::cmp::Ordering;

/// The `n` items with the smallest key, ascending.
///
/// Ties keep their input order and `NaN` keys sort after every number.
pub fn smallest_by<'a, T, F>(items: &[&'a T], n: usize, key: F) -> Vec<&'a T>
where
    F: Fn(&T) -> f64,
{
    let mut sorted: Vec<&'a T> = items.to_vec();
    sorted.sort_by(|a, b| nan_last(key(a), key(b)));
    sorted.truncate(n);
    sorted
}

fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_smallest_in_ascending_order() {
        let values = [5.0, 1.0, f64::NAN, 3.0, 1.0, 4.0];
        let refs: Vec<&f64> = values.iter().collect();
        let picked = smallest_by(&refs, 3, |v| *v);
        // the two 1.0 entries keep their input order
        assert!(std::ptr::eq(picked[0], &values[1]));
        assert!(std::ptr::eq(picked[1], &values[4]));
        assert_eq!(*picked[2], 3.0);
    }

    #[test]
    fn nan_goes_last_and_short_input_is_returned_whole() {
        let values = [f64::NAN, 2.0];
        let refs: Vec<&f64> = values.iter().collect();
        let picked = smallest_by(&refs, 10, |v| *v);
        assert_eq!(picked.len(), 2);
        assert_eq!(*picked[0], 2.0);
        assert!(picked[1].is_nan());
    }
}
