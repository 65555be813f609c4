//! Property-based tests for ordering, filtering and resolution guarantees

mod naming;
