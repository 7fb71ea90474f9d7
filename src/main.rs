use clap::{Parser, Subcommand};
use pepver::{Error, Segment, Version};
use std::cmp::Ordering;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    LibraryError(#[from] Error),
}

impl From<pepver::ParseError> for CliError {
    fn from(err: pepver::ParseError) -> Self {
        CliError::LibraryError(err.into())
    }
}

impl From<pepver::UpdateError> for CliError {
    fn from(err: pepver::UpdateError) -> Self {
        CliError::LibraryError(err.into())
    }
}

/// Parse, compare and bump PEP 440 versions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug messages to stderr. `PEPVER_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the canonical form of a version
    Parse {
        /// The version string to parse
        version: String,

        /// Print each field on its own line instead
        #[arg(long)]
        fields: bool,
    },

    /// Checks that a version is a valid PEP 440 version. Prints `true` or `false` and exits with
    /// 0 or 1 respectively.
    Valid {
        /// The version string to validate
        version: String,
    },

    /// Moves one segment of a version and clears the segments after it.
    ///
    /// Segments are `major`, `minor`, `micro`, `release` (the last release number), `pre`, `post`,
    /// `dev`, or a release index (`0` is major).
    Bump {
        /// The version string to update
        version: String,

        /// The segment to update
        #[arg(short, long, default_value = "release")]
        segment: Segment,

        /// How much to move the segment by. May be negative.
        #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
        by: i64,
    },

    /// Compares two versions. Prints `<`, `==` or `>`.
    Compare {
        /// The left-hand version
        left: String,

        /// The right-hand version
        right: String,
    },

    /// Prints versions in ascending order, one per line, in canonical form
    Sort {
        /// The versions to sort
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Checks that a version is final (neither a pre-release nor a dev-release). Prints `true` or
    /// `false` and exits with 0 or 1 respectively.
    Final {
        /// The version string to check
        version: String,
    },
}

type Output = (String, i32);

fn setup_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var("PEPVER_LOG")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn bool_output(value: bool) -> Output {
    if value {
        ("true".to_string(), 0)
    } else {
        ("false".to_string(), 1)
    }
}

fn fields(version: &Version) -> String {
    let optional = |value: Option<String>| value.unwrap_or_else(|| "none".to_string());
    let release = version
        .release()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    let local = version.local().map(|segments| {
        segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    });
    [
        format!("epoch: {}", version.epoch()),
        format!("release: {release}"),
        format!("pre: {}", optional(version.pre().map(|pre| pre.to_string()))),
        format!("post: {}", optional(version.post().map(|n| n.to_string()))),
        format!("dev: {}", optional(version.dev().map(|n| n.to_string()))),
        format!("local: {}", optional(local)),
    ]
    .join("\n")
}

fn do_work(cli: Cli) -> Result<Output, CliError> {
    match cli.command {
        Commands::Parse { version, fields: show_fields } => {
            let version = Version::parse(&version)?;
            let output = if show_fields {
                fields(&version)
            } else {
                version.to_string()
            };
            Ok((output, 0))
        }
        Commands::Valid { version } => Ok(bool_output(Version::parse(&version).is_ok())),
        Commands::Bump {
            version,
            segment,
            by,
        } => {
            let next = Version::parse(&version)?.update(segment, by)?;
            Ok((next.to_string(), 0))
        }
        Commands::Compare { left, right } => {
            let ordering = Version::parse(&left)?.cmp(&Version::parse(&right)?);
            let symbol = match ordering {
                Ordering::Less => "<",
                Ordering::Equal => "==",
                Ordering::Greater => ">",
            };
            Ok((symbol.to_string(), 0))
        }
        Commands::Sort { versions } => {
            let mut versions = versions
                .iter()
                .map(|version| Version::parse(version))
                .collect::<Result<Vec<_>, _>>()?;
            versions.sort();
            let output = versions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            Ok((output, 0))
        }
        Commands::Final { version } => Ok(bool_output(Version::parse(&version)?.is_final())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn run(args: &[&str]) -> Result<Output, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("pepver").chain(args.iter().copied()))
            .unwrap();
        do_work(cli)
    }

    #[rstest]
    #[case(&["parse", "1.0-Alpha"], "1.0a0", 0)]
    #[case(&["valid", "1.0.post1"], "true", 0)]
    #[case(&["valid", "not-a-version"], "false", 1)]
    #[case(&["bump", "1.2.3"], "1.2.4", 0)]
    #[case(&["bump", "1.2.3", "--segment", "minor"], "1.3", 0)]
    #[case(&["bump", "1.2.3.4a5.post6", "-s", "post", "--by", "-2"], "1.2.3.4a5.post4", 0)]
    #[case(&["bump", "1.2.3", "-s", "4"], "1.2.3.0.1", 0)]
    #[case(&["compare", "1.0", "1.0.0"], "==", 0)]
    #[case(&["compare", "1.0rc1", "1.0"], "<", 0)]
    #[case(&["compare", "1.0+1", "1.0+abc"], ">", 0)]
    #[case(&["sort", "1.0", "1.0.dev1", "1.0.post1", "1.0a1"], "1.0.dev1\n1.0a1\n1.0\n1.0.post1", 0)]
    #[case(&["final", "1.0.post1"], "true", 0)]
    #[case(&["final", "1.0.dev1"], "false", 1)]
    fn test_commands(#[case] args: &[&str], #[case] output: &str, #[case] exit_code: i32) {
        let (actual, actual_code) = run(args).unwrap();
        assert_eq!(output, actual);
        assert_eq!(exit_code, actual_code);
    }

    #[test]
    fn test_parse_fields() {
        let (output, _) = run(&["parse", "--fields", "2!1.0rc1.dev3+Ubuntu-1"]).unwrap();
        assert_eq!(
            "epoch: 2\nrelease: 1.0\npre: rc1\npost: none\ndev: 3\nlocal: ubuntu.1",
            output
        );
    }

    #[rstest]
    #[case(&["parse", "not-a-version"])]
    #[case(&["bump", "1.0", "-s", "pre"])]
    #[case(&["compare", "1.0", "1.0gamma"])]
    #[case(&["bump", "1.0", "-s", "18446744073709551615"])]
    fn test_command_errors(#[case] args: &[&str]) {
        assert!(run(args).is_err());
    }

    #[test]
    fn test_unknown_segment_rejected_by_clap() {
        let res = Cli::try_parse_from(["pepver", "bump", "1.0", "--segment", "patch"]);
        assert!(res.is_err());
    }
}
