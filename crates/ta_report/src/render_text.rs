//! crates/ta_report/src/render_text.rs
//! Plain-text console report.

use std::fmt::Write;

use crate::ReportModel;

pub fn render_text(m: &ReportModel) -> String {
    let mut out = String::new();
    // `fmt::Write` into a String cannot fail.
    let _ = write_report(m, &mut out);
    out
}

fn write_report(m: &ReportModel, out: &mut String) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "Topics:")?;
    for t in &m.topics {
        writeln!(out, "\t{t}")?;
    }

    writeln!(out)?;
    for p in &m.preferences {
        writeln!(out)?;
        writeln!(out, "{}", p.name)?;
        for (i, t) in p.ranked.iter().enumerate() {
            writeln!(out, "\t{}. {}", i + 1, t)?;
        }
    }

    writeln!(out)?;
    for a in &m.assignments {
        let rank = a.rank.map_or_else(|| "none".to_string(), |r| r.to_string());
        writeln!(out, "\"{}\" assigned to \"{}\" (rank = {})", a.name, a.topic, rank)?;
    }
    writeln!(out, "total weight = {}", m.footer.total_weight)?;
    Ok(())
}
