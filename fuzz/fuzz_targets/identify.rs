//! Identification fuzzer.
//!
//! Generates scripts from statement kinds, blank text and body words whose
//! identification is known in advance, and checks that strict parsing
//! recovers exactly those kinds.

use honggfuzz::fuzz;
use sql_statement_identifier::testing::{FuzzScript, test_script_identification};

fn main() {
    loop {
        fuzz!(|script: FuzzScript| {
            test_script_identification(&script);
        });
    }
}
