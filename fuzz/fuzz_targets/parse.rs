//! Parse fuzzer.
//!
//! Feeds arbitrary strings through the parser in both modes. Parsing may fail,
//! but must never panic, and every successful parse must cover the input
//! exactly with tokens and statements in source order.

use honggfuzz::fuzz;
use sql_statement_identifier::testing::test_parse_invariants;

fn main() {
    loop {
        fuzz!(|input: String| {
            test_parse_invariants(&input);
        });
    }
}
