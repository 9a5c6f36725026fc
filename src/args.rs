//! Separating our own flags from the ones meant for difftastic.
//!
//! `diff` and `k8s` forward every flag they don't know to difftastic, so the
//! command line is split in two before it is parsed.

/// Flags each subcommand handles itself, by long and short name
fn known_flags(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "diff" => Some(&["paths", "p", "display", "d", "help", "h"]),
        "k8s" => Some(&["display", "d", "help", "h"]),
        _ => None,
    }
}

/// Arguments split into what we parse and what is passed through
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Partitioned {
    pub own: Vec<String>,
    pub passthrough: Vec<String>,
}

fn flag_name(arg: &str) -> Option<&str> {
    let name = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let name = name.split_once('=').map(|(name, _)| name).unwrap_or(name);
    (!name.is_empty()).then_some(name)
}

/// Everything before the subcommand, the subcommand itself, positional arguments
/// and known flags are ours. Any other flag after a `diff` or `k8s` subcommand
/// goes to difftastic, in the order given.
pub fn partition(args: &[String]) -> Partitioned {
    let mut out = Partitioned::default();
    let mut known: Option<&[&str]> = None;
    let mut seen_command = false;

    for arg in args {
        let flag = flag_name(arg);

        if !seen_command {
            if flag.is_none() {
                seen_command = true;
                known = known_flags(arg);
            }
            out.own.push(arg.clone());
            continue;
        }

        match (known, flag) {
            (Some(known), Some(name)) if !known.contains(&name) => {
                out.passthrough.push(arg.clone())
            }
            _ => out.own.push(arg.clone()),
        }
    }
    out
}
