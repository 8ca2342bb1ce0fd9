//! pdfprobe CLI - smoke test a PDF parser against one URL or file

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfprobe::{
    DocumentParser, ParseOptions, ParseResult, PdfParser, RunOptions, SmokeTest, DEFAULT_OUTPUT,
    DEFAULT_URL,
};

#[derive(Parser, Debug)]
#[command(name = "pdfprobe")]
#[command(version)]
#[command(about = "Parse a PDF, save the result as JSON and print a page summary", long_about = None)]
struct Cli {
    /// PDF URL or file path
    #[arg(value_name = "SOURCE", default_value = DEFAULT_URL)]
    source: String,

    /// JSON output file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    timeout: u64,

    /// Keep pages whose content cannot be extracted
    #[arg(long)]
    lenient: bool,

    /// Parse at most this many pages (0 = all)
    #[arg(long, value_name = "N", default_value_t = 0)]
    max_pages: u32,

    /// Do not report images
    #[arg(long)]
    no_images: bool,

    /// Do not detect tables
    #[arg(long)]
    no_tables: bool,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_pages(self.max_pages)
            .with_images(!self.no_images)
            .with_tables(!self.no_tables);
        if self.lenient {
            options = options.lenient();
        }
        options
    }

    fn run_options(&self) -> RunOptions {
        RunOptions::new()
            .with_source(self.source.as_str())
            .with_output(self.output.as_path())
    }
}

/// Shows a stderr spinner while the wrapped parser runs.
struct WithSpinner<P> {
    inner: P,
}

impl<P: DocumentParser> DocumentParser for WithSpinner<P> {
    fn parse(&self, source: &str) -> pdfprobe::Result<ParseResult> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Parsing PDF...");
        pb.enable_steady_tick(Duration::from_millis(100));

        let result = self.inner.parse(source);
        pb.finish_and_clear();
        result
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    let parser = WithSpinner {
        inner: PdfParser::with_options(cli.parse_options()),
    };
    let test = SmokeTest::new(cli.run_options());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = test.run(&parser, &mut out) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}
