//! Sequential chunking of the filtered identifiers into numbered batches.

use std::num::NonZeroUsize;

use crate::error::BatchError;
use crate::models::{Batch, CellValue};

/// Reject batch sizes below 1.
pub fn validate_batch_size(size: i64) -> Result<NonZeroUsize, BatchError> {
    usize::try_from(size)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(BatchError::InvalidBatchSize(size))
}

/// Number of batches `len` items split into: `ceil(len / size)`.
pub fn count_batches(len: usize, size: NonZeroUsize) -> usize {
    len.div_ceil(size.get())
}

/// Lazy iterator over batches, numbered from 1.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    inner: std::slice::Chunks<'a, CellValue>,
    next_index: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.inner.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some(Batch { index, items })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Chunks<'_> {}

/// Split `items` into consecutive batches of `size`; the last may be shorter.
///
/// Fails with [`BatchError::InvalidBatchSize`] when `size <= 0`.
pub fn chunk(items: &[CellValue], size: i64) -> Result<Chunks<'_>, BatchError> {
    let size = validate_batch_size(size)?;
    Ok(chunk_validated(items, size))
}

/// [`chunk`] for an already validated size.
pub fn chunk_validated(items: &[CellValue], size: NonZeroUsize) -> Chunks<'_> {
    Chunks {
        inner: items.chunks(size.get()),
        next_index: 1,
    }
}
