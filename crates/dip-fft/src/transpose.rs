/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

const TILE: usize = 8;

/// Transpose a row major `width` by `height` matrix into `out_matrix`,
/// which becomes a `height` by `width` matrix
///
/// Works on 8 by 8 tiles so both reads and writes stay within a few cache lines,
/// the last tiles of a row or column are simply cut short.
pub(crate) fn transpose<T: Copy>(
    in_matrix: &[T], out_matrix: &mut [T], width: usize, height: usize
) {
    debug_assert_eq!(in_matrix.len(), width * height);
    debug_assert_eq!(out_matrix.len(), width * height);

    for y_start in (0..height).step_by(TILE) {
        let y_end = (y_start + TILE).min(height);

        for x_start in (0..width).step_by(TILE) {
            let x_end = (x_start + TILE).min(width);

            for y in y_start..y_end {
                let in_row = &in_matrix[y * width..(y + 1) * width];

                for (x, value) in in_row.iter().enumerate().take(x_end).skip(x_start) {
                    out_matrix[x * height + y] = *value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::transpose::transpose;

    fn naive(in_matrix: &[u8], width: usize, height: usize) -> Vec<u8> {
        let mut out = vec![0; width * height];
        for y in 0..height {
            for x in 0..width {
                out[x * height + y] = in_matrix[y * width + x];
            }
        }
        out
    }

    #[test]
    fn matches_naive_for_ragged_sizes() {
        // sizes below, at and past a tile edge
        for (width, height) in [(1, 1), (3, 5), (8, 8), (13, 9), (16, 2), (7, 64)] {
            let mut in_matrix = vec![0_u8; width * height];
            nanorand::WyRand::new().fill(&mut in_matrix);

            let mut out_matrix = vec![0_u8; width * height];
            transpose(&in_matrix, &mut out_matrix, width, height);

            assert_eq!(out_matrix, naive(&in_matrix, width, height), "{width}x{height}");
        }
    }

    #[test]
    fn transposing_twice_is_identity() {
        let (width, height) = (32, 4);
        let in_matrix: Vec<u16> = (0..(width * height) as u16).collect();

        let mut once = vec![0; width * height];
        let mut twice = vec![0; width * height];
        transpose(&in_matrix, &mut once, width, height);
        transpose(&once, &mut twice, height, width);

        assert_eq!(twice, in_matrix);
    }
}
