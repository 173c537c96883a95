/// Controls how much spare capacity a [`BinaryCursor`](crate::BinaryCursor) reserves when a
/// write runs past the end of its buffer.
///
/// When the buffer has to grow, the capacity is extended by `capacity * fraction` bytes, but by
/// at least `minimum` bytes. If that is still not enough for the pending write, exactly the
/// required amount is reserved instead. The length of the buffer always tracks the written data
/// precisely; only the capacity carries slack.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrowthPolicy {
    fraction: f32,
    minimum: usize,
}

impl GrowthPolicy {
    /// The fraction of the current capacity used when no (valid) fraction is given.
    pub const DEFAULT_FRACTION: f32 = 0.1;

    /// The minimum growth in bytes used by `GrowthPolicy::default()`.
    pub const DEFAULT_MINIMUM: usize = 1024;

    /// Constructor
    ///
    /// A `fraction` that is not strictly positive (including NaN) is replaced with
    /// [`Self::DEFAULT_FRACTION`]. A `minimum` of zero is replaced with 1.
    pub fn new(fraction: f32, minimum: usize) -> Self {
        let fraction = if fraction > 0.0 {
            fraction
        } else {
            Self::DEFAULT_FRACTION
        };
        Self {
            fraction,
            minimum: minimum.max(1),
        }
    }

    /// The fraction of the current capacity to grow by.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// The minimum number of bytes to grow by.
    pub fn minimum(&self) -> usize {
        self.minimum
    }

    /// Computes the growth step for a buffer with the given capacity.
    ///
    /// The fractional part is rounded down. The step never exceeds `isize::MAX`, the largest
    /// allocation a `Vec` can hold.
    pub fn step(&self, capacity: usize) -> usize {
        let step = (capacity as f64 * f64::from(self.fraction)).min(MAX_CAPACITY as f64) as usize;
        step.max(self.minimum).min(MAX_CAPACITY)
    }

    /// Computes the capacity to reserve so that the buffer can hold `required` bytes.
    ///
    /// Returns `capacity` unchanged if it already suffices. The slack is capped at `isize::MAX`
    /// total; only `required` itself may exceed it.
    pub fn target_capacity(&self, capacity: usize, required: usize) -> usize {
        if capacity >= required {
            return capacity;
        }
        capacity
            .saturating_add(self.step(capacity))
            .min(MAX_CAPACITY)
            .max(required)
    }
}

const MAX_CAPACITY: usize = isize::MAX as usize;

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            fraction: Self::DEFAULT_FRACTION,
            minimum: Self::DEFAULT_MINIMUM,
        }
    }
}
