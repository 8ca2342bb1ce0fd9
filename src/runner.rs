//! End-to-end smoke test of a [`DocumentParser`].
//!
//! One run parses a single source, writes the result as pretty JSON and
//! prints a per-page summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::ParseResult;
use crate::parser::{DocumentParser, PdfParser};
use crate::summary::Summary;

/// Source parsed when none is given.
pub const DEFAULT_URL: &str = "https://client-uploads.nyc3.digitaloceanspaces.com/pdfs/288c7cb9-4eb0-4adc-9db7-e6b179389ef5/2025-09-17T07-27-39-833Z-5b0916cd.pdf";

/// Output file written when none is given.
pub const DEFAULT_OUTPUT: &str = "test_output.json";

/// What to parse and where to write the result.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// URL or file path handed to the parser
    pub source: String,

    /// JSON output path
    pub output: PathBuf,
}

impl RunOptions {
    /// Create run options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            source: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Drives one parse and reports on it.
#[derive(Debug, Clone, Default)]
pub struct SmokeTest {
    options: RunOptions,
}

impl SmokeTest {
    /// Create a smoke test.
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Parse the source with `parser`, write the JSON file and print the
    /// progress lines and summary to `out`.
    ///
    /// A parse failure is returned before anything is written to disk.
    pub fn run<P, W>(&self, parser: &P, out: &mut W) -> Result<ParseResult>
    where
        P: DocumentParser + ?Sized,
        W: Write,
    {
        writeln!(out, "Testing PDF parser with assignment PDF...")?;
        writeln!(out, "URL: {}", self.options.source)?;
        out.flush()?;

        let result = parser.parse(&self.options.source)?;

        write_json(&self.options.output, &result)?;
        writeln!(
            out,
            "Test completed! Check {} for results.",
            self.options.output.display()
        )?;

        if let Some(summary) = Summary::from_result(&result) {
            writeln!(out)?;
            write!(out, "{}", summary)?;
            log::info!(
                "{} content items across {} pages: {}",
                result.content_count(),
                summary.page_count(),
                summary.document_types()
            );
        }
        out.flush()?;

        Ok(result)
    }
}

/// Write a result as 2-space-indented UTF-8 JSON, replacing any existing file.
pub fn write_json(path: &Path, result: &ParseResult) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.flush()?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// Run the default smoke test: the embedded URL, `test_output.json`, the
/// built-in parser and stdout.
pub fn run() -> Result<ParseResult> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    SmokeTest::default().run(&PdfParser::new(), &mut out)
}
