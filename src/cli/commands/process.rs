//! Dataset process command.
//!
//! `datarun process <format>` reads one fetched dataset and writes a
//! plain-text summary report. Each format maps to one routine in
//! [`crate::process`].

use crate::cli::args::{ProcessArgs, ProcessFormat};
use crate::error::Result;
use crate::process;

use super::dispatcher::{Command, CommandResult};

/// The process command implementation.
pub struct ProcessCommand {
    args: ProcessArgs,
}

impl ProcessCommand {
    /// Create a new process command.
    pub fn new(args: ProcessArgs) -> Self {
        Self { args }
    }
}

impl Command for ProcessCommand {
    fn execute(&self) -> Result<CommandResult> {
        match &self.args.format {
            ProcessFormat::Csv {
                input,
                column,
                output,
            } => process::csv::run(input, column, output)?,
            ProcessFormat::Json {
                input,
                group_by,
                output,
            } => process::json::run(input, group_by, output)?,
            ProcessFormat::Text { input, output, top } => {
                process::text::run(input, output, *top)?
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn process_csv_end_to_end() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.csv");
        fs::write(&input, "score\n1\n3\n").unwrap();
        let output = temp.path().join("out.txt");

        let cmd = ProcessCommand::new(ProcessArgs {
            format: ProcessFormat::Csv {
                input: input.clone(),
                column: "score".to_string(),
                output: output.clone(),
            },
        });
        let result = cmd.execute().unwrap();

        assert!(result.success);
        assert!(fs::read_to_string(output).unwrap().contains("Mean: 2.00"));
    }

    #[test]
    fn process_text_end_to_end() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.txt");
        fs::write(&input, "a b a\n").unwrap();
        let output = temp.path().join("out.txt");

        let cmd = ProcessCommand::new(ProcessArgs {
            format: ProcessFormat::Text {
                input,
                output: output.clone(),
                top: 5,
            },
        });

        assert!(cmd.execute().unwrap().success);
        assert!(fs::read_to_string(output).unwrap().contains("a: 2"));
    }

    #[test]
    fn process_missing_input_errors() {
        let cmd = ProcessCommand::new(ProcessArgs {
            format: ProcessFormat::Json {
                input: PathBuf::from("/definitely/missing.json"),
                group_by: "cls".to_string(),
                output: PathBuf::from("/tmp/out.txt"),
            },
        });

        assert!(cmd.execute().is_err());
    }
}
