//! Pure game rules, independent of persistence and HTTP concerns.

pub mod rules;
