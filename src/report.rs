//! Plain-text report rendering.
//!
//! A pure function of (query, final record sequence); no clock, no
//! pipeline state, so the same inputs always render the same report.

use crate::record::NewsRecord;

pub fn render(query: &str, records: &[NewsRecord]) -> String {
    let mut out = String::new();

    if records.is_empty() {
        out.push_str(&format!("No news found for \"{query}\".\n"));
        return out;
    }

    out.push_str(&format!(
        "News for \"{}\" — {} item{}\n\n",
        query,
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    ));

    for (i, rec) in records.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, rec.title));
        out.push_str(&format!("   source: {}  time: {}\n", rec.source, rec.publish_time));
        if rec.summary != rec.title {
            out.push_str(&format!("   {}\n", rec.summary));
        }
        if !rec.url.is_empty() {
            out.push_str(&format!("   {}\n", rec.url));
        }
        if !rec.matched_keywords.is_empty() {
            out.push_str(&format!("   matched: {}\n", rec.matched_keywords.join(", ")));
        }
        out.push('\n');
    }

    out
}
