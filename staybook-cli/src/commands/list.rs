//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{
    format_timestamp, open_engine, parse_property, write_json, GlobalOptions,
};
use clap::{Args, ValueEnum};
use staybook::config::OutputFormat as ConfiguredFormat;
use staybook::{BookingStatus, RequesterId, Reservation, ReservationFilter};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 10] = [
    "id",
    "code",
    "property",
    "requester",
    "check_in",
    "check_out",
    "guests",
    "status",
    "payment",
    "total",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format [default: `output_format` from configuration, else table]
    #[arg(long, value_enum, env = "STAYBOOK_OUTPUT_FORMAT", ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only reservations for this property
    #[arg(long, value_name = "PROPERTY")]
    pub property: Option<String>,

    /// Only reservations in this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<BookingStatus>,

    /// Only reservations made by this requester
    #[arg(long, value_name = "ID")]
    pub requester: Option<String>,

    /// Include created/updated timestamps in table output
    #[arg(long)]
    pub timestamps: bool,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<ConfiguredFormat> for OutputFormat {
    fn from(format: ConfiguredFormat) -> Self {
        match format {
            ConfiguredFormat::Table => Self::Table,
            ConfiguredFormat::Json => Self::Json,
            ConfiguredFormat::Csv => Self::Csv,
            ConfiguredFormat::Tsv => Self::Tsv,
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut filter = ReservationFilter::all();
        if let Some(ref property) = self.property {
            filter = filter.with_property(parse_property(property)?);
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        if let Some(ref requester) = self.requester {
            let requester = RequesterId::new(requester.as_str())
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            filter = filter.with_requester(requester);
        }

        let (config, engine) = open_engine(global)?;
        let format = self
            .format
            .or_else(|| config.output_format.map(OutputFormat::from))
            .unwrap_or(OutputFormat::Table);

        let reservations = engine.list_reservations(&filter)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match format {
            OutputFormat::Table => format_as_table(&mut out, &reservations, self.timestamps),
            OutputFormat::Json => write_json(&mut out, &reservations),
            OutputFormat::Csv => format_as_delimited(&mut out, &reservations, b','),
            OutputFormat::Tsv => format_as_delimited(&mut out, &reservations, b'\t'),
        }
    }
}

/// One output row per reservation, in `COLUMN_HEADERS` order.
fn row(r: &Reservation) -> [String; 10] {
    [
        r.id.to_string(),
        r.confirmation_code.to_string(),
        r.property_id.to_string(),
        r.requester_id.to_string(),
        r.stay.check_in().to_string(),
        r.stay.check_out().to_string(),
        r.guests.to_string(),
        r.status.to_string(),
        r.payment_status.to_string(),
        r.price.total.to_string(),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table(
    out: &mut impl Write,
    reservations: &[Reservation],
    timestamps: bool,
) -> Result<(), CliError> {
    let mut header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    if timestamps {
        header_line.push_str("\tCREATED_AT\tUPDATED_AT");
    }
    writeln!(out, "{header_line}")?;

    for res in reservations {
        let mut line = row(res).join("\t");
        if timestamps {
            line.push('\t');
            line.push_str(&format_timestamp(res.created_at));
            line.push('\t');
            line.push_str(&format_timestamp(res.updated_at));
        }
        writeln!(out, "{line}")?;
    }

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(
    out: &mut impl Write,
    reservations: &[Reservation],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for res in reservations {
        writer.write_record(row(res)).map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
