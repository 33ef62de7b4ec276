//! CLI argument definitions using clap
//!
//! - dumpspace search <query>                    # Global search
//! - dumpspace scoped <type> <query> --up        # Search inside a hierarchy
//! - dumpspace ancestors/descendants <type>      # Inheritance closures
//! - dumpspace path <a> <b>                      # Shortest inheritance path
//! - dumpspace chain/members/functions <type>    # Type details
//! - dumpspace stats                             # Dataset summary

use clap::{Args, Parser, Subcommand, ValueEnum};
use dumpspace_core::{Direction, EntityKind, ScopedSearchTypes, SearchFilters};
use std::path::PathBuf;

/// Default configuration file name, looked up in the dump directory
pub const DEFAULT_CONFIG_FILE: &str = "dumpspace.toml";

#[derive(Parser, Debug)]
#[command(name = "dumpspace")]
#[command(about = "Dumpspace - search and browse reflection dumps")]
#[command(version)]
pub struct Cli {
    /// Directory holding ClassesInfo.json, StructsInfo.json, FunctionsInfo.json,
    /// EnumsInfo.json and OffsetsInfo.json
    #[arg(long, short = 'd', env = "DUMPSPACE_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Path to configuration file (toml, yaml or json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Explicit config path, or the default file inside the dump directory
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.dir.join(DEFAULT_CONFIG_FILE))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search every category by name, member, member type and parameter
    Search(SearchArgs),

    /// Search a type together with its ancestors and/or descendants
    Scoped(ScopedArgs),

    /// List every ancestor of a class or struct
    Ancestors { name: String },

    /// List every descendant of a class or struct
    Descendants { name: String },

    /// Shortest inheritance path between two types
    Path { from: String, to: String },

    /// Inheritance chain from the root down to a type
    Chain { name: String },

    /// Members of a type including inherited ones
    Members { name: String },

    /// Functions declared on a class
    Functions { class: String },

    /// Entity counts, index sizes and skipped records
    Stats,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub query: String,

    /// Restrict to these categories (repeatable)
    #[arg(long = "kind", short = 'k', value_enum)]
    pub kinds: Vec<KindArg>,

    /// Match member types instead of member names
    #[arg(long = "types", short = 't')]
    pub type_search: bool,

    /// Skip function parameter matching
    #[arg(long)]
    pub no_params: bool,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        if self.kinds.is_empty() {
            return SearchFilters::default();
        }
        let kinds: Vec<EntityKind> = self.kinds.iter().map(|k| EntityKind::from(*k)).collect();
        SearchFilters::only(&kinds)
    }
}

#[derive(Args, Debug)]
pub struct ScopedArgs {
    /// Class or struct the search is centered on
    pub focal: String,

    pub query: String,

    /// Which side of the hierarchy to search
    #[arg(long, value_parser = parse_direction, default_value = "up")]
    pub direction: Direction,

    /// Match member names
    #[arg(long)]
    pub members: bool,

    /// Match function names
    #[arg(long)]
    pub functions: bool,

    /// Match function parameter names and types
    #[arg(long)]
    pub params: bool,

    /// Match class names
    #[arg(long)]
    pub classes: bool,

    /// Match struct names
    #[arg(long)]
    pub structs: bool,

    /// How many member-type hops to follow from matching members
    #[arg(long)]
    pub depth: Option<u32>,

    /// Maximum number of matches
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl ScopedArgs {
    /// Selected search types, or the default set when no flag is given
    pub fn search_types(&self) -> ScopedSearchTypes {
        let selected = ScopedSearchTypes {
            members: self.members,
            functions: self.functions,
            function_params: self.params,
            classes: self.classes,
            structs: self.structs,
        };
        if selected.any() {
            selected
        } else {
            ScopedSearchTypes::default()
        }
    }
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    value.parse()
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Class,
    Struct,
    Function,
    Enum,
    Offset,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Class => EntityKind::Class,
            KindArg::Struct => EntityKind::Struct,
            KindArg::Function => EntityKind::Function,
            KindArg::Enum => EntityKind::Enum,
            KindArg::Offset => EntityKind::Offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_with_kinds() {
        let cli = Cli::try_parse_from([
            "dumpspace", "--dir", "dump", "search", "Health", "-k", "class", "-k", "struct", "-n",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.dir, PathBuf::from("dump"));
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "Health");
        assert_eq!(args.limit, Some(10));
        let filters = args.filters();
        assert!(filters.classes && filters.structs);
        assert!(!filters.functions && !filters.enums && !filters.offsets);
    }

    #[test]
    fn test_scoped_defaults() {
        let cli = Cli::try_parse_from(["dumpspace", "scoped", "AActor", "flags"]).unwrap();
        let Commands::Scoped(args) = cli.command else {
            panic!("expected scoped command");
        };
        assert_eq!(args.direction, Direction::Up);
        assert_eq!(args.search_types(), ScopedSearchTypes::default());
    }

    #[test]
    fn test_scoped_explicit_types_and_direction() {
        let cli = Cli::try_parse_from([
            "dumpspace",
            "scoped",
            "UObject",
            "mesh",
            "--direction",
            "down",
            "--members",
            "--depth",
            "2",
        ])
        .unwrap();
        let Commands::Scoped(args) = cli.command else {
            panic!("expected scoped command");
        };
        assert_eq!(args.direction, Direction::Down);
        assert_eq!(args.search_types(), ScopedSearchTypes::members_only());
        assert_eq!(args.depth, Some(2));
    }

    #[test]
    fn test_invalid_direction_rejected() {
        let result =
            Cli::try_parse_from(["dumpspace", "scoped", "A", "b", "--direction", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_defaults_to_dump_dir() {
        let cli = Cli::try_parse_from(["dumpspace", "--dir", "dump", "stats"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("dump").join(DEFAULT_CONFIG_FILE));
        assert!(!cli.verbose);
    }
}
