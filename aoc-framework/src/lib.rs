//! Framework of traits and utilities for Advent of Code.
//!
//! # Quick Start
//!
//! 1. Define your input type and implement [`ParseData`]:
//!
//! ```
//! # use aoc_framework::{DynamicResult, ParseData};
//! #
//! struct Reports(Vec<String>);
//!
//! impl ParseData for Reports {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         Ok(Self(input.lines().map(String::from).collect()))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Solution`] for each part:
//!
//! ```
//! # use aoc_framework::{DynamicResult, NotImplemented, ParseData, PartOne, PartTwo, Solution};
//! #
//! # struct Reports(Vec<String>);
//! # impl ParseData for Reports {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(String::from).collect()))
//! #     }
//! # }
//! #
//! struct Day02;
//!
//! impl Solution<PartOne> for Day02 {
//!     type Input = Reports;
//!     type Output = usize;
//!
//!     fn solve(input: &Self::Input) -> DynamicResult<usize> {
//!         Ok(input.0.len())
//!     }
//! }
//!
//! // a part that is not solved yet is reported as skipped by the runner
//! impl Solution<PartTwo> for Day02 {
//!     type Input = Reports;
//!     type Output = usize;
//!
//!     fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//!         Err(NotImplemented.into())
//!     }
//! }
//! ```
//!
//! 3. Use the [`runner`] module to execute your solution.
//!
//! # Solution with `Input = str`
//!
//! ```
//! use aoc_framework::{DynamicResult, PartOne, Solution};
//!
//! struct Day03;
//!
//! impl Solution<PartOne> for Day03 {
//!     type Input = str;
//!     type Output = usize;
//!
//!     fn solve(input: &str) -> DynamicResult<usize> {
//!         Ok(input.matches("mul(").count())
//!     }
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

use thiserror::Error;

pub mod parsing;
pub mod runner;

mod private {
    /// A sealed trait so the part markers can't be implemented outside this crate.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// A solution part has not been solved.
///
/// Returning this error from [`Solution::solve`] is not treated as a failure: the runner reports
/// the part as skipped and carries on with the remaining parts.
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("not implemented")]
pub struct NotImplemented;

impl NotImplemented {
    /// Check whether a dynamic error is the [`NotImplemented`] signal.
    #[must_use]
    pub fn is_signal(error: &DynamicError) -> bool {
        error.is::<Self>()
    }
}

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    One,
    Two,
}

impl PartKind {
    /// The one-based number of the part.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// A number does not identify a puzzle part.
#[derive(Error, Debug)]
#[error("invalid part number: {0} (expected 1 or 2)")]
pub struct InvalidPartNumber(pub u8);

impl TryFrom<u8> for PartKind {
    type Error = InvalidPartNumber;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(InvalidPartNumber(value)),
        }
    }
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Part {}", self.number())
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`] to indicate
/// which part the solution implements.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A generic trait for a solution that solve for a [`Part`].
///
/// It is expected solutions implement for the marker structs [`PartOne`] or [`PartTwo`].
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// For direct string input, set to `str`.
    type Input: ?Sized;

    /// The output data type returned from the solution.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// A solution can encounter varying errors while solving, like invalid input. It is returned
    /// as a dynamically dispatched error. Return [`NotImplemented`] for a part that has no
    /// solution yet.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
///
/// Solutions can be passed parsed data constructed through this trait by setting
/// [`Solution::Input`] to the implementing struct.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_kind_from_number() {
        assert_eq!(PartKind::try_from(1).ok(), Some(PartKind::One));
        assert_eq!(PartKind::try_from(2).ok(), Some(PartKind::Two));
        assert!(PartKind::try_from(0).is_err());
        assert!(PartKind::try_from(3).is_err());
    }

    #[test]
    fn part_kind_displays_number() {
        assert_eq!(PartKind::One.to_string(), "Part 1");
        assert_eq!(PartKind::Two.to_string(), "Part 2");
    }

    #[test]
    fn not_implemented_is_detected_through_dynamic_error() {
        let signal: DynamicError = NotImplemented.into();
        assert!(NotImplemented::is_signal(&signal));

        let other: DynamicError = "some other failure".into();
        assert!(!NotImplemented::is_signal(&other));
    }
}
