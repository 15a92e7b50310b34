//! Human-readable tabular view of the ledger for the interactive shell.

use super::chain::Ledger;

/// Renders the ledger as a tab-separated table: a title, a header row, a
/// dash rule, then one row per block in index order. The row fields carry
/// exactly the values the exporters emit.
pub fn render(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str("Ledger:\n");
    out.push_str("Index\tTimestamp\t\tData\tPrevious\tCurrent\tNonce\n");
    out.push_str("-----\t---------\t\t----\t--------\t-------\t-----\n");

    for block in ledger.blocks() {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_has_one_row_per_block() {
        let ledger = Ledger::new();
        ledger.append("genesis").unwrap();
        ledger.append("second").unwrap();

        let table = render(&ledger);
        let lines: Vec<&str> = table.lines().collect();

        // title + header + rule + one row per block
        assert_eq!(lines.len(), 3 + ledger.len());
        assert!(lines[1].starts_with("Index\t"));
    }

    #[test]
    fn test_render_rows_carry_block_fields() {
        let ledger = Ledger::new();
        ledger.append("genesis").unwrap();

        let table = render(&ledger);
        let row = table.lines().nth(3).unwrap();
        let block = ledger.get(0).unwrap();

        let fields: Vec<&str> = row.split('\t').collect();
        assert_eq!(fields[0], block.index.to_string());
        assert_eq!(fields[1], block.timestamp);
        assert_eq!(fields[2], block.data);
        assert_eq!(fields[3], block.previous_hash);
        assert_eq!(fields[4], block.hash);
        assert_eq!(fields[5], block.nonce.to_string());
    }
}
