//! Final statistics and the log-file writer.
//!
//! [`SimReport`] is the snapshot [`Monitor::report`](crate::Monitor::report)
//! takes under the lock; [`write_report`] serializes it in the fixed
//! log shape. Generic over the sink so tests write to a `Vec<u8>` and
//! the binary writes a buffered file.

use std::io::{self, Write};

use weft_net::topology::TRANSITION_INVARIANTS;

/// Final statistics of one simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimReport {
    /// Fired sequence: space-separated `T{idx}` tokens.
    pub sequence: String,
    /// Per-transition firing counts.
    pub fires: Vec<u64>,
    /// Completed cycles per transition-invariant family.
    pub invariant_counts: Vec<u64>,
}

/// Write the report in the log-file shape consumed by downstream
/// tooling. The section headers and line formats are fixed.
pub fn write_report<W: Write>(mut w: W, report: &SimReport) -> io::Result<()> {
    writeln!(w, "{}", report.sequence)?;
    writeln!(w)?;

    writeln!(
        w,
        "-------------------------- Transiciones disparadas --------------------------"
    )?;
    for (t, count) in report.fires.iter().enumerate() {
        writeln!(w, "Transicion {t} disparada: {count} veces.")?;
    }
    writeln!(w)?;

    writeln!(
        w,
        "-------------------------- Invariantes completados --------------------------"
    )?;
    for (j, count) in report.invariant_counts.iter().enumerate() {
        let members = TRANSITION_INVARIANTS[j]
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(w, "Invariante {}: [{members}] completado: {count} veces", j + 1)?;
    }
    writeln!(
        w,
        "Total de invariantes completados: {}",
        report.invariant_counts.iter().sum::<u64>()
    )?;
    Ok(())
}
