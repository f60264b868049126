//! Chain report rendering.

use anyhow::Result;
use colored::Colorize;
use quorumchain_chain::Ledger;
use quorumchain_core::Block;

const DELIMITER: &str = "--------------------------------";

/// Print the per-block textual report: index, timestamp, payload, hash,
/// and previous hash, each block separated by a delimiter line.
pub fn print_chain(ledger: &Ledger) {
    for block in ledger.blocks() {
        println!("{} {}", "Index:".bold(), block.index);
        println!("{} {}", "Timestamp:".bold(), block.timestamp);
        println!("{} {}", "Payload:".bold(), block.payload);
        println!("{} {}", "Hash:".bold(), block.hash);
        println!("{} {}", "PrevHash:".bold(), block.prev_hash);
        println!("{DELIMITER}");
    }
}

/// Render the chain as pretty-printed JSON.
pub fn to_json(ledger: &Ledger) -> Result<String> {
    let blocks: Vec<&Block> = ledger.blocks().collect();
    Ok(serde_json::to_string_pretty(&blocks)?)
}
