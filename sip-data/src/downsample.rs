//! Fixed-stride downsampling that preserves the visible time span.

/// Stride needed to bring `len` items under `budget`. A budget of zero
/// disables downsampling.
pub fn stride_for(len: usize, budget: usize) -> usize {
    if budget == 0 || len <= budget {
        1
    } else {
        len.div_ceil(budget)
    }
}

/// Indices kept when reducing `len` items to roughly `budget`.
///
/// Every `stride`-th index is kept starting at 0, and the last index is
/// appended when the stride skips it, so the result may hold `budget + 1`
/// entries.
pub fn downsample_indices(len: usize, budget: usize) -> Vec<usize> {
    let stride = stride_for(len, budget);
    let mut indices: Vec<usize> = (0..len).step_by(stride).collect();
    if let Some(&last) = indices.last() {
        if last != len - 1 {
            indices.push(len - 1);
        }
    }
    indices
}

/// Keep the items selected by [`downsample_indices`], in order.
pub fn downsample<T: Clone>(items: &[T], budget: usize) -> Vec<T> {
    if stride_for(items.len(), budget) == 1 {
        return items.to_vec();
    }
    downsample_indices(items.len(), budget)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_budget_is_untouched() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(downsample(&items, 10), items);
        assert_eq!(downsample(&items, 0), items);
        assert!(downsample::<u32>(&[], 5).is_empty());
    }

    #[test]
    fn test_two_thousand_hourly_points() {
        let items: Vec<u32> = (0..2000).collect();
        let kept = downsample(&items, 1000);
        assert!(kept.len() <= 1001);
        assert_eq!(kept[0], 0);
        assert_eq!(*kept.last().unwrap(), 1999);
        assert_eq!(kept[1], 2);
    }

    #[test]
    fn test_last_point_forced_when_off_stride() {
        // 10 items, budget 4 -> stride 3 -> 0, 3, 6, 9 (9 is on-stride)
        assert_eq!(downsample_indices(10, 4), vec![0, 3, 6, 9]);
        // 11 items, budget 4 -> stride 3 -> 0, 3, 6, 9 + forced 10
        assert_eq!(downsample_indices(11, 4), vec![0, 3, 6, 9, 10]);
    }

    #[test]
    fn test_output_is_bounded() {
        for len in [731usize, 1000, 1461, 5000, 8784] {
            let kept = downsample_indices(len, 730);
            assert!(kept.len() <= 731, "len {} kept {}", len, kept.len());
            assert_eq!(kept[0], 0);
            assert_eq!(*kept.last().unwrap(), len - 1);
            assert!(kept.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
