//! Global search command

use super::print_json;
use crate::args::SearchArgs;
use anyhow::Result;
use colored::*;
use dumpspace_core::{Dataset, Hit, MatchDetail, SearchOptions};

pub fn run(dataset: &Dataset, args: &SearchArgs, json: bool) -> Result<()> {
    let options = SearchOptions {
        type_search_mode: args.type_search,
        include_function_params: !args.no_params,
        max_results: args.limit,
    };
    let outcome = dataset.search(&args.query, &args.filters(), &options);
    if json {
        return print_json(&outcome);
    }

    if outcome.is_empty() {
        println!("No matches for '{}'", args.query);
        return Ok(());
    }

    for (kind, hits) in outcome.grouped_by_kind() {
        println!("{}", format!("{}s ({})", kind, hits.len()).bold());
        for hit in hits {
            println!("  {}", describe(hit));
        }
    }
    if outcome.truncated {
        println!(
            "{}",
            format!("showing {} of {} matches", outcome.hits.len(), outcome.total_matches).dimmed()
        );
    }
    Ok(())
}

fn describe(hit: &Hit) -> String {
    let reason = format!("[{}]", hit.reason).dimmed();
    let detail = match &hit.detail {
        Some(MatchDetail::Member { name, type_name })
        | Some(MatchDetail::MemberType { name, type_name }) => format!("{} {}", type_name, name),
        Some(MatchDetail::Param { name, type_name, .. }) => format!("param {} {}", type_name, name),
        Some(MatchDetail::EnumValue { name, value }) => format!("{} = {}", name, value),
        Some(MatchDetail::Ancestor { name }) => format!("inherits {}", name),
        None => String::new(),
    };
    if detail.is_empty() {
        format!("{} {}", hit.name.cyan(), reason)
    } else {
        format!("{} {} {}", hit.name.cyan(), reason, detail.dimmed())
    }
}
