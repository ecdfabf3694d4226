//! Variable values held in a process's snapshot
//!
//! This module defines the [`Value`] enum stored in each process's
//! [`Variables`] map. The simulator never evaluates expressions, so values only
//! enter a snapshot through the API (or by inheritance at fork time).
//!
//! # Value Types
//!
//! - [`Value::Int`]: 32-bit signed integer
//! - [`Value::Char`]: 8-bit signed character
//! - [`Value::Str`]: owned string
//! - [`Value::Uninitialized`]: declared but never assigned

use rustc_hash::FxHashMap;

/// A process's variable snapshot (name -> value)
pub type Variables = FxHashMap<String, Value>;

/// Runtime values in a process snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    Int(i32),
    Char(i8),
    Str(String),
    #[default]
    Uninitialized,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "'{}'", *c as u8 as char),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Uninitialized => write!(f, "?"),
        }
    }
}
