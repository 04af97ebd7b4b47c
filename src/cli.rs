use clap::{ArgGroup, Parser};
use eyre::{eyre, Result};
use pngpadder::SizeDirective;
use std::path::PathBuf;

// Source: https://internals.rust-lang.org/t/create-a-flushing-version-of-print/9870/6
macro_rules! print_flush {
    ($($t:tt)*) => {{
        use ::std::io::Write;
        let mut h = ::std::io::stdout();
        _ = write!(h, $($t)*);
        _ = h.flush();
    }}
}
pub(crate) use print_flush;

/// A tool for padding PNG files to specific sizes
#[derive(Parser)]
#[command(version, group(ArgGroup::new("size").required(true).args(["to", "by"])))]
pub struct CliOptions {
    /// Pad the image to this size (in bytes).
    #[arg(long = "to", value_name = "SIZE", allow_negative_numbers = true)]
    to: Option<String>,

    /// Pad the image by this size (in bytes).
    #[arg(long = "by", value_name = "SIZE", allow_negative_numbers = true)]
    by: Option<String>,

    /// The path to the original image
    #[arg(short = 'i', long = "image", value_name = "INPUT")]
    pub input: PathBuf,

    /// The path to write the new image to
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Don't print progress
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl CliOptions {
    pub fn parse() -> Self {
        <CliOptions as Parser>::parse()
    }

    /// The requested size, parsed as a signed byte count.
    pub fn directive(&self) -> Result<SizeDirective> {
        // Sizes are taken as text so a bad value exits like any other failure
        match (&self.to, &self.by) {
            (Some(size), _) => parse_size(size).map(SizeDirective::ToSize),
            (None, Some(size)) => parse_size(size).map(SizeDirective::ByDelta),
            (None, None) => Err(eyre!("one of --to or --by is required")),
        }
    }
}

fn parse_size(s: &str) -> Result<i64> {
    s.trim()
        .parse()
        .map_err(|_| eyre!("Size value was not an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, clap::Error> {
        CliOptions::try_parse_from(std::iter::once("pngpadder").chain(args.iter().copied()))
    }

    #[test]
    fn test_to_directive() {
        let opts = parse(&["--to", "100", "-i", "a.png", "-o", "b.png"]).unwrap();
        assert_eq!(opts.directive().unwrap(), SizeDirective::ToSize(100));
        assert_eq!(opts.input, PathBuf::from("a.png"));
        assert_eq!(opts.output, PathBuf::from("b.png"));
        assert!(!opts.quiet);
    }

    #[test]
    fn test_by_directive_allows_negative() {
        let opts = parse(&["--by", "-3", "--image", "a.png", "--output", "b.png"]).unwrap();
        assert_eq!(opts.directive().unwrap(), SizeDirective::ByDelta(-3));
    }

    #[test]
    fn test_non_integer_size() {
        let opts = parse(&["--by", "12kb", "-i", "a.png", "-o", "b.png"]).unwrap();
        let err = opts.directive().unwrap_err();
        assert_eq!(err.to_string(), "Size value was not an integer");
    }

    #[test]
    fn test_to_and_by_conflict() {
        assert!(parse(&["--to", "1", "--by", "2", "-i", "a", "-o", "b"]).is_err());
    }

    #[test]
    fn test_size_required() {
        assert!(parse(&["-i", "a", "-o", "b"]).is_err());
    }

    #[test]
    fn test_paths_required() {
        assert!(parse(&["--to", "100", "-i", "a"]).is_err());
        assert!(parse(&["--to", "100", "-o", "b"]).is_err());
    }
}
