//! Scoped (inheritance-restricted) search command

use super::print_json;
use crate::args::ScopedArgs;
use anyhow::Result;
use colored::*;
use dumpspace_core::{Dataset, GroupLabel, ScopedMatchKind, ScopedQuery};

pub async fn run(dataset: &Dataset, args: &ScopedArgs, json: bool) -> Result<()> {
    let mut query = ScopedQuery::new(&args.focal, args.direction, &args.query)
        .with_search_types(args.search_types());
    if let Some(limit) = args.limit {
        query = query.with_max_results(limit);
    }
    if let Some(depth) = args.depth {
        query = query.with_child_depth(depth);
    }

    let outcome = dataset.scoped_search(&query).await?;
    if json {
        return print_json(&outcome);
    }

    if outcome.groups.is_empty() {
        println!(
            "No matches for '{}' around {} ({} types searched)",
            args.query, outcome.focal, outcome.searched_types
        );
        return Ok(());
    }

    for group in &outcome.groups {
        let title = match &group.label {
            GroupLabel::Path(path) => path.join(" -> "),
            GroupLabel::Reference(reference) => format!(
                "{} (via {}.{})",
                group.owner, reference.referenced_from, reference.referenced_via
            ),
            GroupLabel::Bare(name) => name.clone(),
        };
        println!("{}", title.bold());
        for found in &group.matches {
            let line = match &found.kind {
                ScopedMatchKind::Member { name, type_name, offset, .. } => {
                    format!("{:#06x}  {} {}", offset, type_name.dimmed(), name.cyan())
                }
                ScopedMatchKind::Function { name } => format!("fn {}", name.cyan()),
                ScopedMatchKind::Param { function, name, type_name } => {
                    format!("fn {}({} {})", function, type_name.dimmed(), name.cyan())
                }
                ScopedMatchKind::Type { kind } => format!("{} {}", kind, found.owner.cyan()),
            };
            println!("  {}", line);
        }
    }
    if outcome.truncated {
        println!("{}", format!("results capped at {}", outcome.total_matches).dimmed());
    }
    Ok(())
}
