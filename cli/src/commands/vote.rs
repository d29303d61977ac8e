//! `ranker vote <id>`: the interactive judging loop.

use super::Context;
use crate::error::Result;
use crate::{output, prompt};
use ranker_engine::{Comparison, RankingEngine};
use std::io::{BufRead, Write};

pub fn run<R: BufRead, W: Write>(ctx: &Context, id: &str, input: &mut R, out: &mut W) -> Result<()> {
    let mut store = ctx.store()?;
    let mut engine = RankingEngine::open(&mut store, id, ctx.rng())?;

    while let Some(pair) = engine.next_pair() {
        let number = engine.finished_count() + 1;
        let title = match engine.progress().total {
            Some(total) => format!("Comparison {number} of {total}:"),
            None => format!("Comparison {number}:"),
        };
        output::header(out, &title)?;
        writeln!(out, "  - 1: {}", pair.0.name)?;
        writeln!(out, "  - 2: {}", pair.1.name)?;

        let Some(choice) = prompt::read_choice(input, out, 2)? else {
            tracing::debug!(session = %id, finished = engine.finished_count(), "input closed");
            writeln!(out, "Aborted. Votes cast so far have been saved.")?;
            return Ok(());
        };

        engine.submit(Comparison::from_pair(pair, choice))?;
    }

    output::header(
        out,
        "All comparisons have been performed. Go ahead and check the results!",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session;
    use crate::commands::testing::{context, items_file, plain};
    use ranker_engine::{ComparisonMode, ComparisonStrategy, SessionStore};
    use std::io::Cursor;

    #[test]
    fn exhaustive_session_to_completion() {
        colored::control::set_override(false);
        let (dir, ctx) = context();
        let file = items_file(&dir, &["a", "b", "c"]);
        session::create(&ctx, "abc", &file, ComparisonMode::Exhaustive, &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        run(&ctx, "abc", &mut Cursor::new("1\n1\n1\n"), &mut out).unwrap();
        let text = plain(out);

        assert!(text.contains("Comparison 1 of 3:"));
        assert!(text.contains("Comparison 3 of 3:"));
        assert!(text.ends_with(
            "All comparisons have been performed. Go ahead and check the results!\n"
        ));
    }

    #[test]
    fn end_of_input_keeps_progress() {
        colored::control::set_override(false);
        let (dir, ctx) = context();
        let file = items_file(&dir, &["a", "b", "c", "d"]);
        session::create(&ctx, "abcd", &file, ComparisonMode::AssumedTransitive, &mut Vec::new())
            .unwrap();

        let mut out = Vec::new();
        run(&ctx, "abcd", &mut Cursor::new("2\nfoo\n1\n"), &mut out).unwrap();
        let text = plain(out);
        assert!(text.contains("Comparison 1:"));
        assert!(text.contains("Invalid choice \"foo\""));
        assert!(text.contains("Aborted."));

        let mut store = ctx.store().unwrap();
        let stored = store.load_session("abcd").unwrap().unwrap();
        let engine = RankingEngine::new(&mut store, stored, ctx.rng()).unwrap();
        assert_eq!(engine.strategy().finished_count(), 2);
    }

    #[test]
    fn unknown_session() {
        let (_dir, ctx) = context();
        let result = run(&ctx, "ghost", &mut Cursor::new(""), &mut Vec::new());
        assert!(result.is_err());
    }
}
