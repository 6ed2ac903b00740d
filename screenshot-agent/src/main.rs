use clap::Parser;
use common::{Locations, Opts, Resolution, Resolver, ShotError, SystemClipboard};
use std::process::exit;

#[derive(Parser)]
#[clap(
    version,
    about = "Finds the latest screenshot on the clipboard, Desktop or Downloads",
    long_about = "Prints two lines: the source (clipboard, or the original file path) and \
    the temp path of a PNG/JPG/JPEG image from the clipboard or Desktop/Downloads.\n\
    Desktop files are copied to temp and trashed; Downloads files are moved.\n\
    Exits 1 if nothing is found."
)]
struct Cli {
    /// Use the clipboard only, with no file fallback
    #[clap(long)]
    clipboard_only: bool,
    /// Search Downloads instead of Desktop
    #[clap(long)]
    downloads: bool,
    /// Verbose logging to stderr
    #[clap(short, long)]
    verbose: bool,
}

impl From<&Cli> for Opts {
    fn from(cli: &Cli) -> Self {
        Opts {
            use_downloads: cli.downloads,
            clipboard_only: cli.clipboard_only,
            verbose: cli.verbose,
        }
    }
}

fn run(opts: Opts) -> anyhow::Result<Resolution> {
    let locations = Locations::from_env()?;
    let mut resolver = Resolver::new(SystemClipboard, locations);
    Ok(resolver.resolve(opts)?)
}

/// Nothing to find is 1, and quiet. Anything else that goes wrong is 2.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ShotError>() {
        Some(e) if e.is_not_found() => 1,
        _ => 2,
    }
}

fn main() {
    let cli = Cli::parse();

    match run(Opts::from(&cli)) {
        Ok(resolution) => {
            println!("{}", resolution.source);
            println!("{}", resolution.temp_path);
        }
        Err(e) => {
            let code = exit_code(&e);
            if code != 1 {
                eprintln!("{}", e);
            }
            exit(code);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;
    use std::io;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_opts_from_cli() {
        let cli = Cli::try_parse_from(["screenshot-agent", "--downloads", "-v"]).unwrap();
        assert_eq!(
            Opts {
                use_downloads: true,
                clipboard_only: false,
                verbose: true,
            },
            Opts::from(&cli)
        );

        let cli = Cli::try_parse_from(["screenshot-agent", "--clipboard-only"]).unwrap();
        assert_eq!(
            Opts {
                use_downloads: false,
                clipboard_only: true,
                verbose: false,
            },
            Opts::from(&cli)
        );

        assert_eq!(
            Opts::default(),
            Opts::from(&Cli::try_parse_from(["screenshot-agent"]).unwrap())
        );
    }

    #[test]
    fn test_bad_args() {
        assert!(Cli::try_parse_from(["screenshot-agent", "--desktop"]).is_err());
        assert!(Cli::try_parse_from(["screenshot-agent", "file.png"]).is_err());
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(1, exit_code(&ShotError::NotFound.into()));
        assert_eq!(2, exit_code(&ShotError::NoHome.into()));
        assert_eq!(
            2,
            exit_code(&ShotError::io("failed", io::Error::from(io::ErrorKind::Other)).into())
        );
        assert_eq!(2, exit_code(&anyhow::anyhow!("something else")));
    }
}
