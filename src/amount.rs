use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{CheckedAdd, Zero};

/// A trait representing an edge weight (cost), which may be negative or fractional.
pub trait Weight: Copy + Add<Output = Self> + PartialOrd + Zero + Debug {
    /// Whether the value is a usable weight. Integers always are.
    fn is_finite(self) -> bool {
        true
    }

    /// `self + rhs`, or `None` if the sum leaves the representable (finite) range.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

impl Weight for i32 {
    fn checked_add(self, rhs: Self) -> Option<Self> {
        i32::checked_add(self, rhs)
    }
}

impl Weight for i64 {
    fn checked_add(self, rhs: Self) -> Option<Self> {
        i64::checked_add(self, rhs)
    }
}

impl Weight for isize {
    fn checked_add(self, rhs: Self) -> Option<Self> {
        isize::checked_add(self, rhs)
    }
}

impl Weight for f32 {
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        f32::is_finite(sum).then_some(sum)
    }
}

impl Weight for f64 {
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        f64::is_finite(sum).then_some(sum)
    }
}

/// A trait representing an edge capacity, which is typically an integer.
pub trait Capacity:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + CheckedAdd
    + Ord
    + AddAssign
    + SubAssign
    + Zero
    + Debug
    + Display
{
}

impl Capacity for i32 {}

impl Capacity for i64 {}

impl Capacity for u32 {}

impl Capacity for u64 {}

impl Capacity for usize {}
