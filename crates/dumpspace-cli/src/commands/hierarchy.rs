//! Inheritance commands

use super::print_json;
use anyhow::{Result, bail};
use dumpspace_core::Dataset;

fn require_type(dataset: &Dataset, name: &str) -> Result<()> {
    if !dataset.graph().contains(name) {
        bail!("'{}' is not a known class or struct", name);
    }
    Ok(())
}

fn print_list(items: &[String], empty: &str) {
    if items.is_empty() {
        println!("{}", empty);
    }
    for item in items {
        println!("{}", item);
    }
}

pub fn ancestors(dataset: &Dataset, name: &str, json: bool) -> Result<()> {
    require_type(dataset, name)?;
    let ancestors: Vec<String> = dataset.ancestors(name).into_iter().collect();
    if json {
        return print_json(&ancestors);
    }
    print_list(&ancestors, "(no ancestors)");
    Ok(())
}

pub fn descendants(dataset: &Dataset, name: &str, json: bool) -> Result<()> {
    require_type(dataset, name)?;
    let descendants: Vec<String> = dataset.descendants(name).into_iter().collect();
    if json {
        return print_json(&descendants);
    }
    print_list(&descendants, "(no descendants)");
    Ok(())
}

pub fn path(dataset: &Dataset, from: &str, to: &str, json: bool) -> Result<()> {
    let path = dataset.path_between(from, to);
    if json {
        return print_json(&path);
    }
    if path.is_empty() {
        println!("{} and {} are not related by inheritance", from, to);
    } else {
        println!("{}", path.join(" -> "));
    }
    Ok(())
}

pub fn chain(dataset: &Dataset, name: &str, json: bool) -> Result<()> {
    let chain = dataset.display_chain(name)?;
    if json {
        return print_json(&chain);
    }
    println!("{}", chain.join(" -> "));
    Ok(())
}
