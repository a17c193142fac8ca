use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Extract NAME_VALUE parameters from experiment log filenames and merge the logs
#[derive(Parser, Debug)]
#[command(
    name = "explog",
    about = "Extract parameters from experiment log filenames and merge the logs",
    version,
    long_about = "explog reads parameters encoded in log filenames as NAME_VALUE tokens \
                  (e.g. run_PSI_1.5_NZERO_3_R_2.log), orders the files by those values \
                  and prints their contents as one stream, each line prefixed with the \
                  parameters of the run it came from."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Merge log files into one parameter-annotated stream",
        long_about = "Collects log files, extracts their parameters and prints every line \
                      prefixed with the values of its run.\n\n\
                      Examples:\n  \
                      explog merge runs/\n  \
                      explog merge -n runs/ --header\n  \
                      explog merge runs/*.log --params PSI,NZERO -o merged.txt"
    )]
    Merge(MergeArgs),

    #[command(
        about = "Show the parameters extracted from each file",
        long_about = "Prints the parameter template and the mapping extracted from every \
                      collected file, without reading file contents.\n\n\
                      Examples:\n  \
                      explog params runs/\n  \
                      explog params runs/ --format json"
    )]
    Params(ParamsArgs),

    #[command(
        about = "Check that every parameter combination has repetitions 1..n",
        long_about = "Groups files by their parameter values and verifies that each group \
                      holds repetitions 1..n with the same n everywhere.\n\n\
                      Examples:\n  \
                      explog check runs/"
    )]
    Check(CheckArgs),
}

/// Options shared by every command that builds a parameter template.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    #[arg(value_name = "PATH", help = "Log files or directories (defaults to current directory)")]
    pub paths: Vec<PathBuf>,

    #[arg(
        long,
        value_name = "NAME",
        conflicts_with = "params",
        help = "Prototype filename to derive parameter names from (defaults to the first file)"
    )]
    pub prototype: Option<String>,

    #[arg(
        long,
        value_name = "NAMES",
        value_delimiter = ',',
        help = "Explicit comma-separated parameter names"
    )]
    pub params: Option<Vec<String>>,

    #[arg(
        long,
        value_name = "EXT",
        help = "Only take files with this suffix from directories (empty for all)"
    )]
    pub extension: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Don't include repetitions. Repetition values are printed unless this is set.
    #[arg(short = 'n', long = "no-repetitions")]
    pub no_repetitions: bool,

    #[arg(long, help = "Skip files whose name does not fit the template instead of failing")]
    pub skip_invalid: bool,

    #[arg(long, help = "Print a header line naming the parameter columns")]
    pub header: bool,

    #[arg(
        short = 's',
        long,
        value_name = "SEP",
        help = "Column separator (\\t for tab)"
    )]
    pub separator: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Don't include repetitions.
    #[arg(short = 'n', long = "no-repetitions")]
    pub no_repetitions: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_merge_args() {
        let args = CliArgs::parse_from(["explog", "merge"]);
        match args.command {
            Commands::Merge(merge_args) => {
                assert!(!merge_args.no_repetitions);
                assert!(!merge_args.skip_invalid);
                assert!(!merge_args.header);
                assert!(merge_args.template.paths.is_empty());
                assert!(merge_args.template.prototype.is_none());
                assert!(merge_args.separator.is_none());
                assert!(merge_args.output.is_none());
            }
            _ => panic!("Expected Merge command"),
        }
    }

    #[test]
    fn test_merge_no_repetitions_flag() {
        let args = CliArgs::parse_from(["explog", "merge", "-n", "runs"]);
        match args.command {
            Commands::Merge(merge_args) => {
                assert!(merge_args.no_repetitions);
                assert_eq!(merge_args.template.paths, vec![PathBuf::from("runs")]);
            }
            _ => panic!("Expected Merge command"),
        }
    }

    #[test]
    fn test_params_list_split_on_commas() {
        let args = CliArgs::parse_from(["explog", "params", "--params", "PSI,NZERO", "-f", "json"]);
        match args.command {
            Commands::Params(params_args) => {
                assert_eq!(
                    params_args.template.params,
                    Some(vec!["PSI".to_string(), "NZERO".to_string()])
                );
                assert_eq!(params_args.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Params command"),
        }
    }

    #[test]
    fn test_prototype_conflicts_with_params() {
        let result = CliArgs::try_parse_from([
            "explog",
            "check",
            "--prototype",
            "PSI_1_R_1",
            "--params",
            "PSI",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["explog", "check", "--log-level", "debug"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        let result = CliArgs::try_parse_from(["explog", "-v", "-q", "check"]);
        assert!(result.is_err());
    }
}
