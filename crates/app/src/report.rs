//! Console output: the symbol table and the run summary.

use huffcode_core::metrics::RunReport;
use huffcode_core::SymbolStats;

/// Width of every table cell.
const CELL_WIDTH: usize = 20;

/// Centre `s` in a cell. An odd amount of padding puts the extra space on the
/// right; text wider than the cell is left as is.
fn center(s: &str) -> String {
    let padding = CELL_WIDTH.saturating_sub(s.chars().count());
    let left = padding / 2;
    let right = padding - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn row(cells: [&str; 4]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push_str(&center(cell));
        line.push('|');
    }
    line.push('\n');
    line
}

/// Render the symbol table, one row per stat in model order.
///
/// The character column holds the decimal byte value, so control codes stay
/// readable.
pub fn format_table(stats: &[SymbolStats]) -> String {
    let mut table = row(["Character", "Probability", "Huffman Code", "Code Length"]);
    for stat in stats {
        let code = stat.code.as_ref().map(|c| c.to_string()).unwrap_or_default();
        table.push_str(&row([
            &stat.symbol.to_string(),
            &format!("{:.6}", stat.probability),
            &code,
            &stat.code_len().to_string(),
        ]));
    }
    table
}

/// Render the sizes and information measures of a run.
pub fn format_summary(report: &RunReport) -> String {
    format!(
        "\n\
         Length Of Compressed Decimal Output File : {} chars\n\
         Length Of Compressed Binary Output File  : {} chars\n\
         Encoded Bits                             : {} bits\n\
         Packed Size                              : {} bytes\n\
         Compression Ratio                        : {:.4}\n\
         \n\
         Entropy of the source                    : {:.6} bits/symbol\n\
         Average code length (L_avg)              : {:.6} bits/symbol\n\
         Efficiency                               : {:.2}%\n",
        report.decimal_text_len,
        report.bit_text_len,
        report.encoded_bits,
        report.packed_bytes,
        report.compression_ratio(),
        report.entropy,
        report.average_code_length,
        report.efficiency() * 100.0,
    )
}

/// Final verdict line.
pub fn verdict(round_trip_ok: bool) -> &'static str {
    if round_trip_ok {
        "SUCCESS! Both texts match."
    } else {
        "ERROR: Text Misconstruction"
    }
}
