//! Read-only export of a ledger's state to external text formats.
//!
//! Both exporters return the rendered text; writing it anywhere is the
//! caller's concern. Field order is fixed and shared by both formats:
//! index, timestamp, data, previous_hash, current_hash, nonce.

use serde::Serialize;

use super::block::Block;
use super::chain::Ledger;

/// CSV column header; also fixes the field order of both formats.
const CSV_HEADER: &str = "index,timestamp,data,previous_hash,current_hash,nonce";

/// JSON document shape: one top-level `chain` array.
#[derive(Serialize)]
struct ChainDocument {
    chain: Vec<BlockRecord>,
}

/// One exported block; key order is the declaration order below.
#[derive(Serialize)]
struct BlockRecord {
    index: u64,
    timestamp: String,
    data: String,
    previous_hash: String,
    current_hash: String,
    nonce: u64,
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        BlockRecord {
            index: block.index,
            timestamp: block.timestamp.clone(),
            data: block.data.clone(),
            previous_hash: block.previous_hash.clone(),
            current_hash: block.hash.clone(),
            nonce: block.nonce,
        }
    }
}

/// Renders the ledger as CSV: a header line, then one line per block in
/// index order.
///
/// Values are emitted verbatim; payloads containing commas or quotes are
/// NOT escaped and will corrupt the delimited layout.
pub fn to_csv(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for block in ledger.blocks() {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            block.index,
            block.timestamp,
            block.data,
            block.previous_hash,
            block.hash,
            block.nonce,
        ));
    }

    out
}

/// Renders the ledger as a pretty-printed JSON document with a single
/// `chain` array, one element per block in index order.
pub fn to_json(ledger: &Ledger) -> String {
    let document = ChainDocument {
        chain: ledger.blocks().iter().map(BlockRecord::from).collect(),
    };

    serde_json::to_string_pretty(&document).unwrap()
}
