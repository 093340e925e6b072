//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use smithy::{
    DEFAULT_RUNTIME_ARTIFACT, DEFAULT_RUNTIME_SOURCE, DEFAULT_TARGET_TRIPLE, Language, OptLevel,
};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the translator or assembler rejects a test case.
pub const EXIT_REJECTED: i32 = 3;
/// Exit code when the linked module disagrees with the native checksum.
pub const EXIT_DIVERGENCE: i32 = 4;

#[derive(Parser)]
#[command(name = "smithy")]
#[command(about = "Differential testing harness - random C/C++ through ll2w vs native")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(flatten)]
    pub tools: ToolArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// External tool commands and paths.
#[derive(clap::Args, Clone, Debug)]
pub struct ToolArgs {
    /// Working directory holding all artifacts
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Random program generator
    #[arg(long, global = true, default_value = "csmith")]
    pub csmith: String,

    /// Native C++ compiler command (e.g., clang++, clang++-20)
    #[arg(long, global = true, default_value = "clang++")]
    pub cc: String,

    /// Target triple for IR lowering
    #[arg(long, global = true, default_value = DEFAULT_TARGET_TRIPLE)]
    pub target: String,

    /// IR-to-bytecode translator
    #[arg(long, global = true, default_value = "ll2w")]
    pub translator: String,

    /// Bytecode assembler
    #[arg(long, global = true, default_value = "wasmc")]
    pub assembler: String,

    /// Bytecode linker
    #[arg(long, global = true, default_value = "wld")]
    pub linker: String,

    /// Runtime library source (relative to --dir)
    #[arg(long, global = true, default_value = DEFAULT_RUNTIME_SOURCE)]
    pub runtime_source: PathBuf,

    /// Built runtime library (relative to --dir)
    #[arg(long, global = true, default_value = DEFAULT_RUNTIME_ARTIFACT)]
    pub runtime: PathBuf,

    /// VM that runs linked modules; enables the checksum comparison
    #[arg(long, global = true)]
    pub vm: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the next test case
    #[command(visible_alias = "gen")]
    Generate {
        #[arg(long, value_enum, default_value = "cpp")]
        lang: LangArg,

        /// Start probing for a free ID here instead of 0
        #[arg(long)]
        id: Option<u64>,
    },
    /// Verify a test case against its native build
    Verify {
        /// Test case ID
        #[arg(value_name = "ID")]
        id: u64,

        #[arg(long, value_enum, default_value = "cpp")]
        lang: LangArg,

        /// Explicit optimization flags (overrides --O0..--Ofast)
        #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
        optimization: Option<String>,

        #[command(flatten)]
        levels: OptLevelArgs,

        /// Stop after translation
        #[arg(long)]
        no_assemble: bool,
    },
    /// Assemble and link a translated test case
    Assemble {
        /// Test case ID
        #[arg(value_name = "ID")]
        id: u64,

        #[arg(long, value_enum, default_value = "cpp")]
        lang: LangArg,
    },
    /// Show which pipeline artifacts exist for a test case
    Status {
        /// Test case ID
        #[arg(value_name = "ID")]
        id: u64,

        #[arg(long, value_enum, default_value = "cpp")]
        lang: LangArg,
    },
}

/// Named optimization levels.
#[derive(clap::Args, Clone, Copy, Debug, Default)]
pub struct OptLevelArgs {
    #[arg(long = "O0")]
    pub o0: bool,
    #[arg(long = "O1")]
    pub o1: bool,
    #[arg(long = "O2")]
    pub o2: bool,
    #[arg(long = "O3")]
    pub o3: bool,
    #[arg(long = "Ofast")]
    pub ofast: bool,
}

impl OptLevelArgs {
    /// Levels flagged on the command line.
    pub fn selected(self) -> Vec<OptLevel> {
        [
            (self.o0, OptLevel::O0),
            (self.o1, OptLevel::O1),
            (self.o2, OptLevel::O2),
            (self.o3, OptLevel::O3),
            (self.ofast, OptLevel::Ofast),
        ]
        .into_iter()
        .filter_map(|(set, level)| set.then_some(level))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LangArg {
    C,
    Cpp,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::C => Self::C,
            LangArg::Cpp => Self::Cpp,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_gen_alias() {
        let cli = Cli::try_parse_from(["smithy", "gen", "--lang", "c"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Generate {
                lang: LangArg::C,
                id: None
            }
        ));
    }

    #[test]
    fn test_verify_flags() {
        let cli = Cli::try_parse_from([
            "smithy",
            "verify",
            "7",
            "--O3",
            "--optimization",
            "-O2 -foo",
        ])
        .unwrap();
        let Commands::Verify {
            id,
            optimization,
            levels,
            ..
        } = cli.command
        else {
            panic!("expected verify");
        };
        assert_eq!(id, 7);
        assert_eq!(optimization.as_deref(), Some("-O2 -foo"));
        assert_eq!(levels.selected(), [OptLevel::O3]);
    }

    #[test]
    fn test_invalid_language_rejected() {
        assert!(Cli::try_parse_from(["smithy", "generate", "--lang", "rust"]).is_err());
    }

    #[test]
    fn test_verify_requires_id() {
        assert!(Cli::try_parse_from(["smithy", "verify"]).is_err());
    }

    #[test]
    fn test_missing_action() {
        assert!(Cli::try_parse_from(["smithy"]).is_err());
    }
}
