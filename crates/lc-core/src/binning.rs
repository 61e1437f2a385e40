//! Fixed-size binning of flat sequences
//!
//! A bin `j` covers indices `[j * binsize, (j + 1) * binsize)`. Only full bins
//! are produced: the trailing `len % binsize` elements are dropped from every
//! result, which shrinks the analysed window for large bin sizes.

use crate::{Error, Result};
use num_traits::Zero;

/// Number of full bins of `binsize` in a sequence of `len` elements
pub fn bin_count(len: usize, binsize: usize) -> usize {
    if binsize == 0 {
        0
    } else {
        len / binsize
    }
}

/// Sum every full window of `binsize` elements
///
/// # Examples
///
/// ```rust
/// use lc_core::binning::bin_sum;
///
/// let counts: [u64; 7] = [1, 2, 3, 4, 5, 6, 7];
/// assert_eq!(bin_sum(&counts, 3).unwrap(), vec![6, 15]);
/// ```
pub fn bin_sum<T>(series: &[T], binsize: usize) -> Result<Vec<T>>
where
    T: Copy + Zero,
{
    if binsize == 0 {
        return Err(Error::zero_binsize("bin_sum"));
    }

    Ok(series
        .chunks_exact(binsize)
        .map(|window| window.iter().fold(T::zero(), |acc, &x| acc + x))
        .collect())
}

/// Split into full windows of `binsize` elements, keeping their contents
///
/// `binsize > series.len()` yields no windows.
pub fn bin_windows<T>(series: &[T], binsize: usize) -> Result<Vec<&[T]>> {
    if binsize == 0 {
        return Err(Error::zero_binsize("bin_windows"));
    }

    Ok(series.chunks_exact(binsize).collect())
}
