//! Dataset summary command

use super::print_json;
use crate::console::CliConsole;
use anyhow::Result;
use dumpspace_core::Dataset;

pub fn run(dataset: &Dataset, console: &CliConsole, json: bool) -> Result<()> {
    let stats = dataset.stats();
    if json {
        return print_json(&stats);
    }

    console.print_header("Entities");
    for (kind, count) in &stats.entities {
        println!("  {:<10} {}", kind.to_string(), count);
    }
    println!("  {:<10} {}", "total", stats.total_entities);

    console.print_header("Indexes");
    println!("  name terms           {}", stats.index.name_terms);
    println!("  member name terms    {}", stats.index.member_name_terms);
    println!("  member type terms    {}", stats.index.member_type_terms);
    println!("  function param terms {}", stats.index.function_param_terms);
    println!("  postings             {}", stats.index.postings);
    println!("  inheritance nodes    {}", stats.inheritance_nodes);

    let report = dataset.report();
    if report.total_skipped() > 0 || report.duplicates > 0 {
        console.print_header("Skipped records");
        for issue in &report.issues {
            println!(
                "  {:<8} {:<32} {}",
                issue.kind.to_string(),
                issue.key.as_deref().unwrap_or("?"),
                issue.reason
            );
        }
        if report.issues.len() < report.total_skipped() {
            println!("  ... {} more", report.total_skipped() - report.issues.len());
        }
        println!("  duplicates replaced: {}", report.duplicates);
    }
    Ok(())
}
