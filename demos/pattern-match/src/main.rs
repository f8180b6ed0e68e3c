use pattern_surgeon::config::PatternSetConfig;
use pattern_surgeon::error_handling::Result;
use pattern_surgeon::{compile, try_matches, SearchLimits};

use clap::{Arg, ArgAction, Command};

fn main() -> Result<()> {
    let matches = Command::new("pattern-match")
        .version(pattern_surgeon::version())
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a YAML file of named patterns")
                .value_name("CONFIG_FILE"),
        )
        .arg(
            Arg::new("max-states")
                .long("max-states")
                .help("Give up after exploring this many search states (overrides the config's max_states)")
                .value_parser(clap::value_parser!(usize))
                .value_name("N"),
        )
        .arg(
            Arg::new("pattern")
                .help("Pattern to match against (ignored with --config)")
                .required_unless_present("config")
                .value_name("PATTERN"),
        )
        .arg(
            Arg::new("text")
                .help("Texts to match")
                .action(ArgAction::Append)
                .value_name("TEXT"),
        )
        .get_matches();

    let mut texts: Vec<String> = matches
        .get_many::<String>("text")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let max_states = matches.get_one::<usize>("max-states").copied();

    if let Some(config_path) = matches.get_one::<String>("config") {
        // Without a separate pattern, the positional slot holds the first text.
        if let Some(first) = matches.get_one::<String>("pattern") {
            texts.insert(0, first.clone());
        }
        let config = PatternSetConfig::parse_from_file(config_path)?;
        let limits = match max_states {
            Some(_) => SearchLimits { max_states },
            None => *config.get_limits(),
        };
        for text in &texts {
            let names = config.match_all_with_limits(text, &limits)?;
            println!("{}: [{}]", text, names.join(", "));
        }
        return Ok(());
    }

    let pattern_source: &String = matches.get_one("pattern").expect("no pattern found");
    let pattern = compile(pattern_source)?;
    let limits = SearchLimits { max_states };
    for text in &texts {
        let verdict = match try_matches(text, &pattern, &limits)? {
            true => "match",
            false => "no match",
        };
        println!("{}: {}", text, verdict);
    }

    Ok(())
}
