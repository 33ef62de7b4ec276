//! Type detail commands

use super::print_json;
use anyhow::Result;
use colored::*;
use dumpspace_core::{Dataset, LinkSegment};

/// Type text with known type names highlighted
fn linked(dataset: &Dataset, type_text: &str) -> String {
    dataset
        .linkify(type_text)
        .into_iter()
        .map(|segment| match segment {
            LinkSegment::Text { text } => text,
            LinkSegment::Link { text, .. } => text.underline().to_string(),
        })
        .collect()
}

pub fn members(dataset: &Dataset, name: &str, json: bool) -> Result<()> {
    let members = dataset.members_with_inherited(name)?;
    if json {
        return print_json(&members);
    }

    let mut current = "";
    for entry in &members {
        if entry.declared_in != current {
            current = entry.declared_in;
            println!("{}", current.bold());
        }
        let member = entry.member;
        println!(
            "  {:#06x}  {:>4}  {} {}",
            member.offset,
            member.size,
            linked(dataset, &member.ty.display()),
            member.name.cyan()
        );
    }
    Ok(())
}

pub fn functions(dataset: &Dataset, class: &str, json: bool) -> Result<()> {
    let functions = dataset.functions_of(class);
    if json {
        return print_json(&functions);
    }
    if functions.is_empty() {
        println!("{} declares no functions", class);
        return Ok(());
    }

    for function in functions {
        let params: Vec<String> = function
            .params
            .iter()
            .map(|param| format!("{} {}", linked(dataset, &param.ty.display()), param.name))
            .collect();
        println!(
            "{:#010x}  {} {}({})",
            function.offset,
            linked(dataset, &function.return_type.display()),
            function.func_name.cyan(),
            params.join(", ")
        );
    }
    Ok(())
}
