use crate::common::config::HASH_MULTIPLIER;

/// Maps a course number to a bucket index in `[0, bucket_count)`.
///
/// Every character is folded into a running accumulator as
/// `acc = (acc * 27 + char_code) % bucket_count`. There is no seed, so the
/// same key always lands in the same bucket for the lifetime of a table.
#[derive(Debug, Clone, Copy)]
pub struct CourseHashFunction {
    bucket_count: u64,
}

impl CourseHashFunction {
    /// Creates a new `CourseHashFunction`.
    ///
    /// # Parameters
    /// - `bucket_count`: Number of buckets in the owning table. Must be non-zero.
    pub fn new(bucket_count: usize) -> Self {
        debug_assert!(bucket_count > 0, "bucket count must be non-zero");
        Self {
            bucket_count: bucket_count as u64,
        }
    }

    /// Returns the bucket index for the given key.
    ///
    /// # Parameters
    /// - `key`: The course number to be hashed.
    ///
    /// # Returns
    /// The bucket index.
    pub fn get_hash(&self, key: &str) -> usize {
        let mut acc: u64 = 0;
        for c in key.chars() {
            acc = (acc * HASH_MULTIPLIER + c as u64) % self.bucket_count;
        }
        (acc % self.bucket_count) as usize
    }
}
