//! Chunk planning for transfers with per-chunk progress.

use std::ops::Range;

/// Splits a payload of `total` bytes into fixed-size chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    total: usize,
    chunk_size: usize,
}

impl ChunkPlan {
    /// Plan `total` bytes in chunks of `chunk_size` (at least 1).
    pub fn new(total: usize, chunk_size: usize) -> Self {
        Self {
            total,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Number of chunks; an empty payload still takes one (empty) chunk.
    pub fn chunk_count(&self) -> usize {
        self.total.div_ceil(self.chunk_size).max(1)
    }

    /// Byte ranges of each chunk, in order.
    pub fn chunks(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.chunk_count()).map(move |i| {
            let start = (i * self.chunk_size).min(self.total);
            let end = (start + self.chunk_size).min(self.total);
            start..end
        })
    }

    /// Completion percentage once `sent` bytes are through.
    pub fn percent_after(&self, sent: usize) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((sent.min(self.total) * 100) / self.total) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_cover_payload() {
        let plan = ChunkPlan::new(10, 4);
        let ranges: Vec<_> = plan.chunks().collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
        assert_eq!(plan.percent_after(4), 40);
        assert_eq!(plan.percent_after(10), 100);
    }

    #[test]
    fn test_empty_payload_is_one_chunk() {
        let plan = ChunkPlan::new(0, 4);
        assert_eq!(plan.chunks().collect::<Vec<_>>(), vec![0..0]);
        assert_eq!(plan.percent_after(0), 100);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let plan = ChunkPlan::new(3, 0);
        assert_eq!(plan.chunk_count(), 3);
    }
}
