//! Command-line parsing and command implementations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use formguard::{FormErrors, FormSchema, FormValues, NumericPolicy, RuleKind};

use crate::config::Config;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "formguard", version)]
#[command(about = "Validate form records against JSON rule sets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate a record against a schema
    Check(CheckOptions),
    /// List rules in evaluation order with their default messages
    Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct CheckOptions {
    /// Schema file (JSON)
    pub schema: PathBuf,
    /// Values file (JSON object of field to value)
    pub values: PathBuf,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Fail min/max on input that is not a number
    #[arg(long)]
    pub strict_numbers: bool,
}

/// Outcome of `check`.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Number of fields with rules.
    pub fields: usize,
    pub errors: FormErrors,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }
}

/// Validate the values file against the schema file.
pub fn check(opts: &CheckOptions, config: &Config) -> Result<CheckReport, CliError> {
    let policy = if opts.strict_numbers {
        NumericPolicy::Strict
    } else {
        config.numeric_policy
    };

    let rules = FormSchema::from_path(&opts.schema)?.compile_with(policy)?;
    let values = read_values(&opts.values)?;
    let errors = rules.validate(&values);

    log::info!(
        "Checked {} against {}: {} of {} fields invalid",
        opts.values.display(),
        opts.schema.display(),
        errors.len(),
        rules.len()
    );

    Ok(CheckReport {
        fields: rules.len(),
        errors,
    })
}

fn read_values(path: &Path) -> Result<FormValues, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Print a check report as text or JSON.
pub fn write_report(out: &mut impl Write, report: &CheckReport, json: bool) -> io::Result<()> {
    if json {
        let body = serde_json::json!({
            "valid": report.is_valid(),
            "errors": report.errors,
        });
        serde_json::to_writer_pretty(&mut *out, &body)?;
        return writeln!(out);
    }

    if report.is_valid() {
        return writeln!(out, "All {} fields valid", report.fields);
    }

    for (field, messages) in report.errors.iter() {
        for message in messages {
            writeln!(out, "{}: {}", field, message)?;
        }
    }
    writeln!(
        out,
        "{} of {} fields invalid",
        report.errors.len(),
        report.fields
    )
}

/// Print every rule in evaluation order with its default message.
pub fn write_rules(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Rules (in evaluation order):")?;
    for rule in RuleKind::ALL {
        writeln!(out, "  {:<10} {}", rule.as_str(), rule.message_template())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use tempfile::NamedTempFile;

    use super::*;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn check_options(schema: &NamedTempFile, values: &NamedTempFile) -> CheckOptions {
        CheckOptions {
            schema: schema.path().to_path_buf(),
            values: values.path().to_path_buf(),
            json: false,
            strict_numbers: false,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli =
            Cli::try_parse_from(["formguard", "check", "s.json", "--json", "v.json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Check(CheckOptions {
                schema: PathBuf::from("s.json"),
                values: PathBuf::from("v.json"),
                json: true,
                strict_numbers: false,
            })
        );

        let cli = Cli::try_parse_from(["formguard", "check", "s", "v", "--strict-numbers"]).unwrap();
        assert!(matches!(cli.command, Command::Check(CheckOptions { strict_numbers: true, .. })));
    }

    #[test]
    fn test_parse_errors() {
        let err = Cli::try_parse_from(["formguard", "check", "only-one.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["formguard", "check", "a", "b", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Cli::try_parse_from(["formguard", "lint"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);

        assert!(matches!(CliError::from(err), CliError::Usage(_)));
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["formguard", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_check_reports_failures() {
        let schema = json_file(r#"{"fields": {"name": {"required": true}, "age": {"min": 18}}}"#);
        let values = json_file(r#"{"name": "", "age": "abc"}"#);
        let mut opts = check_options(&schema, &values);

        let report = check(&opts, &Config::default()).unwrap();
        assert_eq!(report.fields, 2);
        assert_eq!(report.errors.fields().collect::<Vec<_>>(), vec!["name"]);

        opts.strict_numbers = true;
        let report = check(&opts, &Config::default()).unwrap();
        assert_eq!(report.errors.first("age"), Some("Must be a valid number"));

        let mut out = Vec::new();
        write_report(&mut out, &report, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("name: This field is required"));
        assert!(text.contains("2 of 2 fields invalid"));
    }

    #[test]
    fn test_check_rejects_nested_values() {
        let schema = json_file(r#"{"fields": {}}"#);
        let values = json_file(r#"{"a": {"b": 1}}"#);
        assert!(matches!(
            check(&check_options(&schema, &values), &Config::default()),
            Err(CliError::Json { .. })
        ));
    }

    #[test]
    fn test_json_report() {
        let mut errors = FormErrors::new();
        errors.set("email", Some("Please enter a valid email address".to_string()));
        let report = CheckReport { fields: 1, errors };

        let mut out = Vec::new();
        write_report(&mut out, &report, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["errors"]["email"][0], "Please enter a valid email address");
    }

    #[test]
    fn test_rules_listing_in_order() {
        let mut out = Vec::new();
        write_rules(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let required = text.find("required").unwrap();
        let custom = text.find("custom").unwrap();
        assert!(required < custom);
        assert!(text.contains("This field is required"));
    }
}
