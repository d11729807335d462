use std::fmt;

use serde::Serialize;

use super::step::StepExecution;

/// Final summary of an import, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub dry_run: bool,
    pub encoding: String,
    /// The detected delimiter, as a character
    pub delimiter: char,
    /// `imported + skipped`
    pub processed: usize,
    pub imported: usize,
    pub skipped: usize,
    /// Blank rows, not part of `processed`
    pub ignored: usize,
    /// Skip and error messages, in input order
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn from_execution(
        execution: &StepExecution,
        dry_run: bool,
        encoding: &str,
        delimiter: u8,
    ) -> Self {
        Self {
            dry_run,
            encoding: encoding.to_string(),
            delimiter: char::from(delimiter),
            processed: execution.processed_count(),
            imported: execution.imported_count,
            skipped: execution.skipped_count,
            ignored: execution.ignored_count,
            errors: execution.messages.clone(),
        }
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(f, "Dry run: no data was inserted.")?;
        }
        write!(
            f,
            "Import complete. Processed: {}, Imported: {}, Skipped: {}",
            self.processed, self.imported, self.skipped
        )?;

        if !self.errors.is_empty() {
            write!(f, "\nThe following errors occurred during the import:")?;
            for error in &self.errors {
                write!(f, "\n{}", error)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ImportReport;

    fn report(errors: Vec<String>) -> ImportReport {
        ImportReport {
            dry_run: false,
            encoding: "UTF-8".to_string(),
            delimiter: ',',
            processed: 3,
            imported: 1,
            skipped: 2,
            ignored: 0,
            errors,
        }
    }

    #[test]
    fn summary_line_without_errors() {
        assert_eq!(
            report(Vec::new()).to_string(),
            "Import complete. Processed: 3, Imported: 1, Skipped: 2"
        );
    }

    #[test]
    fn errors_follow_the_summary_in_order() {
        let mut report = report(vec!["first".to_string(), "second".to_string()]);
        report.dry_run = true;

        assert_eq!(
            report.to_string(),
            "Dry run: no data was inserted.\n\
             Import complete. Processed: 3, Imported: 1, Skipped: 2\n\
             The following errors occurred during the import:\n\
             first\n\
             second"
        );
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(report(vec!["first".to_string()])).unwrap();

        assert_eq!(json["processed"], 3);
        assert_eq!(json["delimiter"], ",");
        assert_eq!(json["errors"][0], "first");
    }
}
