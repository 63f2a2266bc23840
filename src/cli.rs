use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{
    Command, CommandFactory, FromArgMatches,
    error::{Error as ClapError, ErrorKind as ClapErrorKind, Result as ClapResult},
};
use itertools::Itertools;
use openapi_ts_types::{
    assemble::NameFormat,
    config::{ConfigFile, GenerateConfig},
    error::ConfigError,
};

const DEFAULT_OUTPUT: &str = "openapi-typescript-types.ts";

#[derive(Debug)]
pub struct Main {
    pub verbose: bool,
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: GenerateConfig,
}

impl Main {
    /// Parses command-line arguments, and merges them with the config
    /// file if one was given. Arguments take precedence over the file.
    pub fn parse() -> ClapResult<Main> {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(args: I) -> ClapResult<Main>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = MainArgs::command();
        let mut matches = cmd
            .try_get_matches_from_mut(args)
            .map_err(|err| err.format(&mut cmd))?;
        let args =
            MainArgs::from_arg_matches_mut(&mut matches).map_err(|err| err.format(&mut cmd))?;

        let file = match &args.config {
            Some(path) => ConfigFile::from_path(path).map_err(|err| config_error(&mut cmd, err))?,
            None => ConfigFile::default(),
        };

        let input = args
            .input
            .or(args.input_flag)
            .or(file.input)
            .ok_or_else(|| {
                cmd.error(
                    ClapErrorKind::MissingRequiredArgument,
                    "an OpenAPI document is required; pass `<INPUT>` or set `input` in the config file",
                )
            })?;
        let output = args
            .output
            .or(file.output)
            .unwrap_or_else(|| DEFAULT_OUTPUT.into());

        let mut config =
            GenerateConfig::from_options(file.options).map_err(|err| config_error(&mut cmd, err))?;
        if let Some(format) = args.type_name_format {
            config.type_name_format = format;
        }

        Ok(Main {
            verbose: args.verbose,
            input,
            output,
            config,
        })
    }
}

fn config_error(cmd: &mut Command, err: ConfigError) -> ClapError {
    let kind = match err {
        ConfigError::Read(..) => ClapErrorKind::Io,
        _ => ClapErrorKind::ValueValidation,
    };
    // Clap only prints the top-level message, so spell out the causes.
    let message =
        std::iter::successors(Some(&err as &dyn Error), |err| (*err).source()).join(": ");
    cmd.error(kind, message)
}

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct MainArgs {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// The path to the OpenAPI document (`.yaml` or `.json`). Defaults
    /// to the config file's `input`.
    input: Option<PathBuf>,

    /// Same as `<INPUT>`.
    #[arg(long = "input", value_name = "INPUT", conflicts_with = "input")]
    input_flag: Option<PathBuf>,

    /// A YAML or TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The TypeScript file to write. Defaults to the config file's
    /// `output`, or `openapi-typescript-types.ts`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// A template for declaration names, like `Api{name}`.
    #[arg(long, value_name = "FORMAT")]
    type_name_format: Option<NameFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use pretty_assertions::assert_eq;

    const BIN: &str = "openapi-ts-types";

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("config.yaml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    // MARK: Input

    #[test]
    fn test_positional_input() {
        let main = Main::parse_from([BIN, "api.yaml"]).unwrap();
        assert_eq!(main.input, Path::new("api.yaml"));
        assert_eq!(main.output, Path::new(DEFAULT_OUTPUT));
        assert!(!main.verbose);
    }

    #[test]
    fn test_input_flag() {
        let main = Main::parse_from([BIN, "--input", "api.yaml"]).unwrap();
        assert_eq!(main.input, Path::new("api.yaml"));
    }

    #[test]
    fn test_input_flag_conflicts_with_positional() {
        let err = Main::parse_from([BIN, "a.yaml", "--input", "b.yaml"]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let err = Main::parse_from([BIN, "-o", "types.ts"]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_missing_input_in_config_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "output: types.ts\n");

        let err = Main::parse_from([BIN, "-c", config.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::MissingRequiredArgument);
    }

    // MARK: Config file

    #[test]
    fn test_config_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            indoc::indoc! {"
                version: 1
                input: api.yaml
                output: out/types.ts
                options:
                  typeNameFormat: I{name}
            "},
        );

        let main = Main::parse_from([BIN, "-c", config.to_str().unwrap()]).unwrap();
        assert_eq!(main.input, dir.path().join("api.yaml"));
        assert_eq!(main.output, dir.path().join("out/types.ts"));
        assert_eq!(main.config.type_name_format.apply("Pet"), "IPet");
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            indoc::indoc! {"
                input: api.yaml
                output: file.ts
                options:
                  typeNameFormat: I{name}
            "},
        );

        let main = Main::parse_from([
            BIN,
            "-c",
            config.to_str().unwrap(),
            "--input",
            "other.yaml",
            "-o",
            "flag.ts",
            "--type-name-format",
            "{name}Dto",
        ])
        .unwrap();
        assert_eq!(main.input, Path::new("other.yaml"));
        assert_eq!(main.output, Path::new("flag.ts"));
        assert_eq!(main.config.type_name_format.apply("Pet"), "PetDto");
    }

    #[test]
    fn test_unsupported_config_version() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "version: 2\ninput: api.yaml\n");

        let err = Main::parse_from([BIN, "-c", config.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::ValueValidation);
        assert!(err.to_string().contains("unsupported config file version 2"));
    }

    #[test]
    fn test_config_error_includes_cause() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("missing.yaml");
        let cause = std::fs::read(&config).unwrap_err().to_string();

        let err = Main::parse_from([BIN, "-c", config.to_str().unwrap()]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::Io);
        let message = err.to_string();
        assert!(message.contains("failed to read config file"), "{message}");
        assert!(message.contains(&cause), "{message}");
    }
}
