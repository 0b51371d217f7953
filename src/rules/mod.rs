//! Built-in rules.
//!
//! Every rule here is a plain [`Rule`](crate::foundation::Rule)
//! implementation; nothing is special-cased by the engine. Each module also
//! exports lowercase factory functions (`min_length(5)`,
//! `in_range(18, 120)`) for use at schema registration.

pub mod collection;
pub mod general;
pub mod numeric;
pub mod string;

pub use collection::{HasElements, MaxCount, MinCount, NoNullElements};
pub use general::{EqualTo, NotEqualTo, Optional, Required, WhenPresent};
pub use numeric::{GreaterThan, InRange, LessThan};
pub use string::{Matches, MaxLength, MinLength, NotEmpty};
