use std::process::ExitCode;

use anyhow::Context;
use bpaf::{Parser, construct, long, positional, short};
use camino::Utf8PathBuf;
use diffyaml::{
    DisplayMode, PathList,
    args::partition,
    config::{Configuration, config_from_env},
    difftastic::{self, Difftastic, Outcome},
    order::sort_file,
    warning::Stderr,
    workspace,
};
use owo_colors::OwoColorize;

#[derive(Debug, Clone)]
enum Command {
    Diff {
        paths: Option<PathList>,
        display: Option<DisplayMode>,
        left: Utf8PathBuf,
        right: Utf8PathBuf,
    },
    Kubernetes {
        display: Option<DisplayMode>,
        left: Utf8PathBuf,
        right: Utf8PathBuf,
    },
    Sort {
        order: Option<PathList>,
        file: Utf8PathBuf,
    },
}

#[derive(Debug, Clone)]
struct Args {
    verbosity: usize,
    command: Command,
}

fn display() -> impl Parser<Option<DisplayMode>> {
    short('d')
        .long("display")
        .help(format!("Display format: {}", DisplayMode::choices()).as_str())
        .argument::<DisplayMode>("MODE")
        .optional()
}

fn left() -> impl Parser<Utf8PathBuf> {
    positional::<Utf8PathBuf>("LEFT").help("First YAML file")
}

fn right() -> impl Parser<Utf8PathBuf> {
    positional::<Utf8PathBuf>("RIGHT").help("Second YAML file")
}

fn args() -> impl Parser<Args> {
    let verbosity = short('v')
        .long("verbose")
        .help("Increase verbosity level (can be repeated)")
        .req_flag(())
        .many()
        .map(|v| v.len());

    let diff = {
        let paths = short('p')
            .long("paths")
            .help("Comma-separated list of paths to compose yaml doc filename")
            .argument::<PathList>("PATHS")
            .optional();
        let display = display();
        let left = left();
        let right = right();
        construct!(Command::Diff {
            paths,
            display,
            left,
            right
        })
        .to_options()
        .descr("Split yaml contents of files to yaml docs and diff them by difftastic")
        .command("diff")
    };

    let k8s = {
        let display = display();
        let left = left();
        let right = right();
        construct!(Command::Kubernetes {
            display,
            left,
            right
        })
        .to_options()
        .descr(
            "Same as 'diff' but with predefined 'paths=apiVersion,kind,metadata.namespace,metadata.name'",
        )
        .command("k8s")
    };

    let sort = {
        let order = long("order")
            .short('o')
            .help("Comma-separated list of fields to sort by")
            .argument::<PathList>("PATHS")
            .optional();
        let file = positional::<Utf8PathBuf>("FILE").help("YAML file to read");
        construct!(Command::Sort { order, file })
            .to_options()
            .descr("Read yaml file and dump it to stdout, sorted by the values in 'order' if given")
            .command("sort")
    };

    let command = construct!([diff, k8s, sort]);

    construct!(Args { verbosity, command })
}

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let split = partition(&raw);
    let own: Vec<&str> = split.own.iter().map(String::as_str).collect();

    let args = match args()
        .to_options()
        .descr("Shows human-readable diffs for yamls with multiple documents")
        .footer(
            "All unrecognized flags of 'diff' and 'k8s' are passed directly to difftastic. \
             Use '--flag=value' notation, e.g. '--tab-width=10'",
        )
        .run_inner(&own[..])
    {
        Ok(args) => args,
        Err(failure) => {
            failure.print_mesage(100);
            return ExitCode::from(failure.exit_code() as u8);
        }
    };

    if let Err(err) = setup_logging(args.verbosity) {
        eprintln!("{}", report(&err));
        return ExitCode::FAILURE;
    }

    log::debug!("Starting diffyaml with args: {:?}", args);

    match run(args.command, split.passthrough) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Differences(code)) => ExitCode::from(code.clamp(1, 255) as u8),
        Err(err) => {
            eprintln!("{}", report(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, passthrough: Vec<String>) -> anyhow::Result<Outcome> {
    let config = config_from_env()?;

    match command {
        Command::Diff {
            paths,
            display,
            left,
            right,
        } => {
            let paths = paths
                .or_else(|| config.paths.clone())
                .context("paths flag is required")?;
            let difft = difftastic_from(&config, display, passthrough);
            workspace::diff(&left, &right, &paths, &difft, &mut Stderr)
        }
        Command::Kubernetes {
            display,
            left,
            right,
        } => {
            let difft = difftastic_from(&config, display, passthrough);
            workspace::diff(&left, &right, &PathList::kubernetes(), &difft, &mut Stderr)
        }
        Command::Sort { order, file } => {
            let order = order.or(config.order);
            let mut stdout = std::io::stdout().lock();
            sort_file(&file, order.as_ref(), &mut stdout)?;
            Ok(Outcome::Success)
        }
    }
}

fn difftastic_from(
    config: &Configuration,
    display: Option<DisplayMode>,
    passthrough: Vec<String>,
) -> Difftastic {
    let program = config
        .difftastic
        .clone()
        .unwrap_or_else(|| difftastic::DEFAULT_PROGRAM.to_string());
    let display = display.or(config.display).unwrap_or_default();
    Difftastic::new(program, display, passthrough)
}

/// One cause per line, each indented a step further than the one before
fn report(err: &anyhow::Error) -> String {
    let mut lines = vec![err.to_string()];
    for (depth, cause) in err.chain().skip(1).enumerate() {
        lines.push(format!("{}because {cause}", " ".repeat(depth + 1)));
    }
    lines.join("\n").red().to_string()
}

fn setup_logging(verbosity: usize) -> Result<(), anyhow::Error> {
    let filter = match verbosity {
        0 => "off",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format(|buf, record| {
            use std::io::Write;

            let level_color = match record.level() {
                log::Level::Error => record.level().to_string().red().to_string(),
                log::Level::Warn => record.level().to_string().yellow().to_string(),
                log::Level::Info => record.level().to_string().green().to_string(),
                log::Level::Debug => record.level().to_string().blue().to_string(),
                log::Level::Trace => record.level().to_string().purple().to_string(),
            };

            writeln!(buf, "[{}] {}", level_color, record.args())
        })
        .try_init()?;

    Ok(())
}
