// Path: crates/cli/src/commands/mod.rs

use mno_execution::ExecutionReceipt;

pub mod call;
pub mod digest;
pub mod records;

/// Prints a call's JSON result on stdout. Calls with no result print nothing.
fn print_output(receipt: &ExecutionReceipt) {
    if !receipt.output.is_empty() {
        println!("{}", String::from_utf8_lossy(&receipt.output));
    }
}
