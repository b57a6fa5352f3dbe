//! Embedded system prompts for the query-style commands.
//!
//! Each command pairs the gathered user input with one of these templates.
//! They are compiled into the binary so the tool works without installed
//! data files.

/// Pass-through prompt for arbitrary queries.
pub const QUERY: &str = include_str!("prompts/query.md");

/// Asks the model for an implementation plan.
pub const PLAN: &str = include_str!("prompts/plan.md");

/// Asks the model for source code and nothing else.
pub const CODE: &str = include_str!("prompts/code.md");

/// Asks the model for a code review.
pub const REVIEW: &str = include_str!("prompts/review.md");
