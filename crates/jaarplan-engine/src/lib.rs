//! # Jaarplan Engine
//!
//! Pure calendar computation. Everything here is a function of an
//! activities/weeks snapshot and an [`AcademicYear`]; nothing performs I/O.
//!
//! # Modules
//!
//! - [`dates`]: Dutch `DD-MMM[-YYYY]` date tokens
//! - [`tokenize`]: Role field tokenizer
//! - [`week_index`]: Week Index fold over raw week rows
//! - [`assignment`]: Overlap assignment of activities to weeks
//! - [`filter`]: Role-branching filter predicate
//! - [`options`]: Filter options, sanitizing and option statistics
//! - [`calendar`]: One full recomputation tying the above together
//!
//! # Example
//!
//! ```ignore
//! use jaarplan_engine::{AcademicYear, Calendar};
//!
//! let calendar = Calendar::build(&activities, &weeks, &AcademicYear::new(2025));
//! let selection = calendar.sanitize(&requested);
//! let visible = calendar.filter(&selection);
//! ```

pub mod assignment;
pub mod calendar;
pub mod dates;
pub mod filter;
pub mod options;
pub mod tokenize;
pub mod week_index;

pub use assignment::{AssignmentError, assign};
pub use calendar::Calendar;
pub use dates::{AcademicYear, DateParseError, format_token, normalize};
pub use filter::{Branch, matches};
pub use options::{FilterCatalog, option_stats};
pub use tokenize::{Token, TokenSet, tokenize};
pub use week_index::WeekIndex;
