use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_traits::{CheckedAdd, CheckedNeg, CheckedSub, One, Zero};

/// A trait representing a signed amount in minor currency units (e.g. cents).
///
/// All arithmetic inside the engine happens on this type, so implementations are expected to be
/// exact integers. Accumulation goes through the checked operations.
pub trait Amount:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + CheckedAdd
    + CheckedSub
    + CheckedNeg
    + Zero
    + One
    + Debug
    + Display
    + Default
{
}

impl Amount for i32 {}

impl Amount for i64 {}

impl Amount for i128 {}
