//! Line-based prompts over any reader and writer.

use std::io::{self, BufRead, Write};

/// Ask until the user enters a number in `1..=count`.
///
/// Returns the zero-based choice, or `None` when input ends first.
pub fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    count: usize,
) -> io::Result<Option<usize>> {
    loop {
        write!(out, "Enter the number of the item you think is better: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let answer = line.trim();
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            Ok(n) => writeln!(out, "Invalid choice {n}")?,
            Err(_) => writeln!(out, "Invalid choice {answer:?}")?,
        }
    }
}

/// Yes/no question defaulting to no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} [y/N]: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
