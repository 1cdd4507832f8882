use alloc::string::String;
use core::fmt::Debug;

/// A trait representing a participant identifier.
pub trait Id: Clone + Ord + Debug {}

impl Id for i32 {}

impl Id for u64 {}

impl Id for String {}

impl<'a> Id for &'a str {}
