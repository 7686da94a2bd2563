use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doczip")]
#[command(version)]
#[command(about = "Inspect ZIP-packaged Javadoc archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  doczip jsoup.zip                      show library metadata\n  \
  doczip -l jsoup.zip                   list documented classes\n  \
  doczip jsoup.zip org.jsoup.Jsoup      show documentation for one class")]
pub struct Cli {
    /// Javadoc ZIP archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Fully-qualified class to show (e.g. java.lang.String)
    #[arg(value_name = "CLASS")]
    pub class: Option<String>,

    /// List the classes in the archive
    #[arg(short = 'l', long = "list", conflicts_with = "class")]
    pub list: bool,

    /// Show debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_class_argument() {
        let cli = Cli::try_parse_from(["doczip", "lib.zip", "java.lang.String"]).unwrap();
        assert_eq!(cli.archive, PathBuf::from("lib.zip"));
        assert_eq!(cli.class.as_deref(), Some("java.lang.String"));
        assert!(!cli.list);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_list_conflicts_with_class() {
        assert!(Cli::try_parse_from(["doczip", "-l", "lib.zip"]).unwrap().list);
        assert!(Cli::try_parse_from(["doczip", "-l", "lib.zip", "a.B"]).is_err());
    }

    #[test]
    fn test_verbose() {
        let cli = Cli::try_parse_from(["doczip", "-v", "lib.zip"]).unwrap();
        assert_eq!(cli.log_filter(), "debug");
    }
}
