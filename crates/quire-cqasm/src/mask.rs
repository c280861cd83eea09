//! Classical condition masks.

/// Decode a condition mask into `(lowest set bit, span length)`.
///
/// The span runs from the lowest through the highest set bit, gaps included,
/// since a cQASM binary control addresses a contiguous `b[low:high]` range.
/// A zero mask yields `(-1, 0)`.
///
/// ```rust
/// use quire_cqasm::mask_data;
///
/// assert_eq!(mask_data(0), (-1, 0));
/// assert_eq!(mask_data(56), (3, 3));
/// assert_eq!(mask_data(510), (1, 8));
/// ```
pub fn mask_data(mask: u64) -> (i32, u32) {
    if mask == 0 {
        return (-1, 0);
    }
    let lowest = mask.trailing_zeros();
    let highest = u64::BITS - 1 - mask.leading_zeros();
    // `lowest` < 64, so the cast is lossless.
    (lowest as i32, highest - lowest + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mask() {
        assert_eq!(mask_data(0), (-1, 0));
    }

    #[test]
    fn test_single_bit_masks() {
        assert_eq!(mask_data(1), (0, 1));
        assert_eq!(mask_data(128), (7, 1));
        assert_eq!(mask_data(1 << 63), (63, 1));
    }

    #[test]
    fn test_contiguous_masks() {
        assert_eq!(mask_data(56), (3, 3));
        assert_eq!(mask_data(192), (6, 2));
        assert_eq!(mask_data(255), (0, 8));
        assert_eq!(mask_data(510), (1, 8));
    }

    #[test]
    fn test_mask_with_gap() {
        // bits 3 and 5 set: the span still covers bit 4
        assert_eq!(mask_data(0b10_1000), (3, 3));
    }

    #[test]
    fn test_full_mask() {
        assert_eq!(mask_data(u64::MAX), (0, 64));
    }
}
