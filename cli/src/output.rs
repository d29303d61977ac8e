//! Result rendering: text table and JSON.

use colored::Colorize;
use ranker_engine::Standing;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct JsonStanding<'a> {
    rank: usize,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    wins: Option<usize>,
}

#[derive(Debug, Serialize)]
struct JsonResults<'a> {
    session: &'a str,
    #[serde(rename = "final")]
    is_final: bool,
    items: Vec<JsonStanding<'a>>,
}

/// Rank of each standing. Items with equal win counts share the rank of the
/// first item of their run; unscored items are ranked by position.
pub fn ranks(standings: &[Standing]) -> Vec<usize> {
    let mut ranks: Vec<usize> = Vec::with_capacity(standings.len());
    for (i, standing) in standings.iter().enumerate() {
        let tied = i > 0 && standing.wins.is_some() && standing.wins == standings[i - 1].wins;
        let rank = match ranks.last() {
            Some(&previous) if tied => previous,
            _ => i + 1,
        };
        ranks.push(rank);
    }
    ranks
}

pub fn header<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.bright_white().bold())
}

/// Human readable results.
pub fn write_results<W: Write>(
    out: &mut W,
    session_name: &str,
    standings: &[Standing],
    is_final: bool,
) -> io::Result<()> {
    header(out, &format!("Results for session {session_name}:"))?;

    let digits = standings.len().max(1).to_string().len();
    let ranks = ranks(standings);

    for (i, (standing, rank)) in standings.iter().zip(&ranks).enumerate() {
        let continues_tie = i > 0 && ranks[i - 1] == *rank;
        let label = if continues_tie {
            " ".repeat(digits + 1)
        } else {
            format!("{rank:0>digits$}:")
        };
        match standing.wins {
            Some(wins) => writeln!(out, "   {label} {} ({wins})", standing.name)?,
            None => writeln!(out, "   {label} {}", standing.name)?,
        }
    }

    header(
        out,
        if is_final {
            "Results are final."
        } else {
            "Results are not final. Some comparisons have not been completed yet."
        },
    )
}

/// Results as a pretty-printed JSON document.
pub fn write_results_json<W: Write>(
    out: &mut W,
    session_id: &str,
    standings: &[Standing],
    is_final: bool,
) -> io::Result<()> {
    let items = standings
        .iter()
        .zip(ranks(standings))
        .map(|(standing, rank)| JsonStanding {
            rank,
            name: &standing.name,
            wins: standing.wins,
        })
        .collect();

    let doc = JsonResults {
        session: session_id,
        is_final,
        items,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
