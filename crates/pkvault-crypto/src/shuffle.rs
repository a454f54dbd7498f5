//! Block shuffle.
//!
//! The record body after the 8-byte header is split into four 32-byte blocks.
//! Bits 13..17 of the personality value pick one of 24 orderings. Shuffling
//! only relocates bytes; nothing is altered.

/// Offset of the first shuffled block.
pub const BODY_OFFSET: usize = 0x08;

/// Size of one block in bytes.
pub const BLOCK_SIZE: usize = 0x20;

/// Number of shuffled blocks.
pub const BLOCK_COUNT: usize = 4;

/// Number of distinct block orderings.
pub const PERMUTATION_COUNT: usize = 24;

const BODY_SIZE: usize = BLOCK_SIZE * BLOCK_COUNT;

/// Stored position of each canonical block, per shuffle value.
///
/// Row `sv`, column `b`: the stored block that holds canonical block `b`.
pub const BLOCK_POSITION: [[u8; BLOCK_COUNT]; PERMUTATION_COUNT] = [
    [0, 1, 2, 3],
    [0, 1, 3, 2],
    [0, 2, 1, 3],
    [0, 3, 1, 2],
    [0, 2, 3, 1],
    [0, 3, 2, 1],
    [1, 0, 2, 3],
    [1, 0, 3, 2],
    [2, 0, 1, 3],
    [3, 0, 1, 2],
    [2, 0, 3, 1],
    [3, 0, 2, 1],
    [1, 2, 0, 3],
    [1, 3, 0, 2],
    [2, 1, 0, 3],
    [3, 1, 0, 2],
    [2, 3, 0, 1],
    [3, 2, 0, 1],
    [1, 2, 3, 0],
    [1, 3, 2, 0],
    [2, 1, 3, 0],
    [3, 1, 2, 0],
    [2, 3, 1, 0],
    [3, 2, 1, 0],
];

/// Row of [`BLOCK_POSITION`] that undoes each row.
pub const BLOCK_POSITION_INVERT: [u8; PERMUTATION_COUNT] = [
    0, 1, 2, 4, 3, 5, 6, 7, 12, 18, 13, 19, 8, 10, 14, 20, 16, 22, 9, 11, 15, 21, 17, 23,
];

/// Shuffle value selected by a personality value.
#[inline]
pub const fn shuffle_value(pid: u32) -> usize {
    (((pid & 0x3E000) >> 13) as usize) % PERMUTATION_COUNT
}

/// Rearrange stored blocks into canonical order.
///
/// `data` must hold at least the header and four blocks.
pub fn unshuffle_blocks(data: &mut [u8], sv: usize) {
    permute(data, &BLOCK_POSITION[sv % PERMUTATION_COUNT]);
}

/// Rearrange canonical blocks into stored order for `sv`.
pub fn shuffle_blocks(data: &mut [u8], sv: usize) {
    let inverse = BLOCK_POSITION_INVERT[sv % PERMUTATION_COUNT] as usize;
    permute(data, &BLOCK_POSITION[inverse]);
}

fn permute(data: &mut [u8], order: &[u8; BLOCK_COUNT]) {
    let body = &mut data[BODY_OFFSET..BODY_OFFSET + BODY_SIZE];
    let mut source = [0u8; BODY_SIZE];
    source.copy_from_slice(body);

    for (block, &from) in order.iter().enumerate() {
        let from = from as usize * BLOCK_SIZE;
        body[block * BLOCK_SIZE..(block + 1) * BLOCK_SIZE]
            .copy_from_slice(&source[from..from + BLOCK_SIZE]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tagged_body() -> Vec<u8> {
        let mut data = vec![0xEEu8; BODY_OFFSET + BODY_SIZE + 4];
        for block in 0..BLOCK_COUNT {
            let start = BODY_OFFSET + block * BLOCK_SIZE;
            data[start..start + BLOCK_SIZE].fill(block as u8);
        }
        data
    }

    #[test]
    fn test_rows_are_distinct_permutations() {
        for (i, row) in BLOCK_POSITION.iter().enumerate() {
            let mut sorted = *row;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2, 3]);
            for other in &BLOCK_POSITION[i + 1..] {
                assert_ne!(row, other);
            }
        }
    }

    #[test]
    fn test_inverse_table() {
        for sv in 0..PERMUTATION_COUNT {
            let row = BLOCK_POSITION[sv];
            let inverse = BLOCK_POSITION[BLOCK_POSITION_INVERT[sv] as usize];
            for block in 0..BLOCK_COUNT {
                assert_eq!(row[inverse[block] as usize] as usize, block);
            }
        }
    }

    #[test]
    fn test_unshuffle_moves_blocks() {
        let mut data = tagged_body();
        // sv 3 stores canonical blocks at positions [0, 3, 1, 2]
        unshuffle_blocks(&mut data, 3);
        let order: Vec<u8> = (0..BLOCK_COUNT)
            .map(|b| data[BODY_OFFSET + b * BLOCK_SIZE])
            .collect();
        assert_eq!(order, vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_header_and_tail_untouched() {
        let mut data = tagged_body();
        shuffle_blocks(&mut data, 17);
        assert!(data[..BODY_OFFSET].iter().all(|&b| b == 0xEE));
        assert!(data[BODY_OFFSET + BODY_SIZE..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn test_shuffle_value() {
        assert_eq!(shuffle_value(0), 0);
        assert_eq!(shuffle_value(23 << 13), 23);
        assert_eq!(shuffle_value(24 << 13), 0);
        assert_eq!(shuffle_value(31 << 13), 7);
        assert_eq!(shuffle_value(0xFFFF_FFFF & !0x3E000), 0);
    }

    proptest! {
        #[test]
        fn shuffle_is_invertible(body in prop::collection::vec(any::<u8>(), BODY_OFFSET + BODY_SIZE), sv in 0usize..PERMUTATION_COUNT) {
            let mut data = body.clone();
            shuffle_blocks(&mut data, sv);
            unshuffle_blocks(&mut data, sv);
            prop_assert_eq!(&data, &body);

            unshuffle_blocks(&mut data, sv);
            shuffle_blocks(&mut data, sv);
            prop_assert_eq!(&data, &body);
        }
    }
}
