use clap::Parser;

/// Finds clerkship rotation trade matches from a roster spreadsheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) JSON description of the roster sources, the
    /// schedule rules and the server address. See the documentation for the
    /// file format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) A local roster export (.xlsx or .csv). If
    /// specified, overrides the sources from the --config file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default from the file extension) The type of local input: xlsx or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (optional) When reading an Excel file, the name of the worksheet to
    /// use. Defaults to the first worksheet.
    #[clap(long, value_parser)]
    pub worksheet_name: Option<String>,

    /// (optional) A student name for a one-shot lookup printed to stdout.
    /// Requires --block; without both, the web service starts instead.
    #[clap(short, long, value_parser)]
    pub name: Option<String>,

    /// (optional) The block for the one-shot lookup, e.g. "Round 1" or
    /// "Selective".
    #[clap(short, long, value_parser)]
    pub block: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
