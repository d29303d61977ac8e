//! `ranker results <id>`

use super::Context;
use crate::error::Result;
use crate::output;
use ranker_engine::RankingEngine;
use std::io::Write;

pub fn run<W: Write>(ctx: &Context, id: &str, json: bool, out: &mut W) -> Result<()> {
    let mut store = ctx.store()?;
    let engine = RankingEngine::open(&mut store, id, ctx.rng())?;

    let standings = engine.results();
    let is_final = engine.is_final();
    let session = engine.session();

    if json {
        output::write_results_json(out, &session.id, &standings, is_final)?;
    } else {
        output::write_results(out, &session.name, &standings, is_final)?;
    }
    Ok(())
}
