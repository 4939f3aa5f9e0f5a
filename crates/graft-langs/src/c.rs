//! The C base grammar's precedence levels.
//!
//! `grammar.json` only keeps the numbers, so the names the C grammar was written
//! with are restated here for extensions to build on.

use graft_compiler::PrecedenceTable;

/// The `PREC` object of the C grammar.
pub const PREC: &[(&str, i32)] = &[
    ("PAREN_DECLARATOR", -10),
    ("ASSIGNMENT", -1),
    ("CONDITIONAL", -2),
    ("DEFAULT", 0),
    ("LOGICAL_OR", 1),
    ("LOGICAL_AND", 2),
    ("INCLUSIVE_OR", 3),
    ("EXCLUSIVE_OR", 4),
    ("BITWISE_AND", 5),
    ("EQUAL", 6),
    ("RELATIONAL", 7),
    ("SIZEOF", 8),
    ("SHIFT", 9),
    ("ADD", 10),
    ("MULTIPLY", 11),
    ("CAST", 12),
    ("UNARY", 13),
    ("CALL", 14),
    ("FIELD", 15),
    ("SUBSCRIPT", 16),
];

pub fn precedence_table() -> PrecedenceTable {
    PrecedenceTable::from_levels(PREC.iter().copied())
}
