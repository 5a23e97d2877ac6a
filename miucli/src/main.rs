use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::{info, warn};
use miucore::{prelude::*, utils::conf::MiuConfig};

mod logger;

/// Decide whether a word is derivable from `MI` in the MIU system.
#[derive(Parser)]
#[command(name = "miu", version, about)]
pub struct Arguments {
    /// Word over the alphabet M, I, U
    word: String,

    /// Print a certificate built without search
    #[arg(short, long)]
    certificate: bool,

    /// Run the bounded breadth-first search and print the shortest certificate it finds
    #[arg(short, long)]
    search: bool,

    /// Print certificates as TOML
    #[arg(long)]
    toml: bool,

    /// Print the whole explored rewrite graph in Graphviz DOT format
    #[arg(long)]
    dot: bool,

    /// Maximum number of rule applications explored by the search
    #[arg(long)]
    max_steps: Option<usize>,

    /// Maximum length of strings explored by the search
    #[arg(long)]
    max_length: Option<usize>,

    /// Maximum number of strings visited by the search
    #[arg(long)]
    max_states: Option<usize>,

    /// Configuration file, defaults to `$MIU_CONFIG_PATH` or `~/.config/miu/config.toml`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Arguments {
    /// Limits from the configuration file, overridden by command-line flags.
    fn limits(&self, config: &MiuConfig) -> SearchLimits {
        let mut limits = config.search;
        if let Some(max_steps) = self.max_steps {
            limits.max_steps = max_steps;
        }
        if let Some(max_length) = self.max_length {
            limits.max_length = max_length;
        }
        if self.max_states.is_some() {
            limits.max_states = self.max_states;
        }
        limits
    }
}

fn print_derivation(derivation: &Derivation, as_toml: bool) -> MiuResult<()> {
    if as_toml {
        print!("{}", toml::to_string(derivation)?);
    } else {
        print!("{derivation}");
    }
    Ok(())
}

fn run(args: &Arguments) -> MiuResult<()> {
    let config = match &args.config {
        Some(path) => MiuConfig::load(path)?,
        None => MiuConfig::load_or_default(MiuConfig::default_path())?,
    };
    let limits = args.limits(&config);
    info!("Search limits: {limits:?}");

    let word = parse(&args.word)?;
    let verdict = decide(&word);
    println!("{word}: {verdict}");

    if args.certificate && verdict.is_derivable() {
        let derivation = construct_derivation(&word)?;
        println!("certificate ({} steps):", derivation.len());
        print_derivation(&derivation, args.toml)?;
    }

    if args.search {
        if verdict.is_derivable() {
            let derivation = Searcher::new(limits).search(&word)?;
            println!("shortest certificate found by search ({} steps):", derivation.len());
            print_derivation(&derivation, args.toml)?;
        } else {
            warn!("`{word}` is not derivable, skipping the search");
        }
    }

    if args.dot {
        let graph = Searcher::new(limits).explore();
        info!("Explored {} strings: {:?}", graph.len(), graph.stats());
        println!("{}", graph.to_dot());
    }

    Ok(())
}

fn main() {
    let args = Arguments::parse();
    logger::init(args.verbose);

    if let Err(error) = run(&args) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configuration() {
        let args = Arguments::parse_from(["miu", "MUI", "--max-steps", "5", "-vv"]);
        let text = "[search]\nmax_steps = 9\nmax_length = 11\n";
        let config = MiuConfig::from_toml_str(text, "inline").unwrap();
        let limits = args.limits(&config);
        assert_eq!(limits.max_steps, 5);
        assert_eq!(limits.max_length, 11);
        assert_eq!(limits.max_states, None);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn certificate_renders_as_toml() {
        let derivation = construct_derivation(&parse("MUI").unwrap()).unwrap();
        let text = toml::to_string(&derivation).unwrap();
        assert!(text.contains("CollapseIII"));
    }
}
