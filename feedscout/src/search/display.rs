use std::io::{self, Write};
use std::sync::mpsc::Receiver;

use crate::results::Match;

/// Renders results as they arrive until every sender is gone.
///
/// Each result is written as the field name, then the content, followed by
/// a blank line. Returns the number of results rendered once the channel is
/// closed and drained.
pub fn display<W: Write>(results: Receiver<Match>, out: &mut W) -> io::Result<usize> {
    let mut rendered = 0;
    for result in results {
        writeln!(out, "{}", result)?;
        out.flush()?;
        rendered += 1;
    }
    Ok(rendered)
}
