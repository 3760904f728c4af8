use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use simplelog::LevelFilter;
use treerow::{CollapsePolicy, GuideStyle, IndexConfig};

#[derive(Parser, Debug)]
#[command(
    name = "treerow",
    about = "Browse a directory tree as a flat, scrollable list of rows",
    version
)]
pub struct Args {
    /// Directory to browse
    #[arg(value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Number of rows shown at once
    #[arg(short = 'n', long, default_value_t = 20)]
    pub height: usize,

    /// Glyphs used for the indentation guides
    #[arg(long, value_enum, default_value_t = StyleArg::Unicode)]
    pub style: StyleArg,

    /// Show entries whose name starts with a dot
    #[arg(short = 'a', long)]
    pub hidden: bool,

    /// Collapsing a directory also collapses everything below it
    #[arg(long)]
    pub reset_descendants: bool,

    /// Check the rows against the file system after every change (slow)
    #[arg(long)]
    pub validate: bool,

    /// Expansion state file (defaults to the platform data directory)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Neither load nor save the expansion state
    #[arg(long, conflicts_with = "state")]
    pub no_state: bool,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Ascii,
    Unicode,
    Rounded,
}

impl From<StyleArg> for GuideStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Ascii => GuideStyle::Ascii,
            StyleArg::Unicode => GuideStyle::Unicode,
            StyleArg::Rounded => GuideStyle::Rounded,
        }
    }
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn index_config(&self) -> IndexConfig {
        let policy = if self.reset_descendants {
            CollapsePolicy::ResetDescendants
        } else {
            CollapsePolicy::PreserveDescendants
        };
        IndexConfig::new()
            .collapse_policy(policy)
            .validate_after_mutation(self.validate)
    }
}
