use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::TrendError;
use crate::groups::{accumulate, accumulate_parallel, LineStats};
use crate::ranking::select_top;
use crate::report::render;

/// What a run did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub records: usize,
    pub skipped: usize,
    pub groups: usize,
    pub reported: usize,
}

/// Read the input, group and rank it, and write the report.
///
/// Both files are opened before the first line is read.
pub fn run(settings: &Settings) -> Result<Summary, TrendError> {
    let input = open_input(&settings.input)?;
    let output = File::create(&settings.output)
        .map_err(|e| TrendError::file_open(&settings.output, e))?;
    debug!(input = %settings.input.display(), output = %settings.output.display(), mode = %settings.mode, "opened files");

    let (groups, stats) = if settings.parallel {
        let lines = read_lines(input).collect::<Result<Vec<_>, _>>()?;
        accumulate_parallel(&lines, settings.mode)
    } else {
        let mut failure = None;
        let lines = read_lines(input).map_while(|line| line.map_err(|e| failure = Some(e)).ok());
        let accumulated = accumulate(lines, settings.mode);
        if let Some(e) = failure {
            return Err(e.into());
        }
        accumulated
    };

    let ranked = select_top(&groups, settings.top);
    let mut out = BufWriter::new(output);
    render(&mut out, &ranked, &groups, settings.samples, settings.format)?;
    out.flush()?;

    let LineStats {
        lines,
        records,
        skipped,
    } = stats;
    let summary = Summary {
        lines,
        records,
        skipped,
        groups: groups.len(),
        reported: ranked.len(),
    };
    info!(
        lines = summary.lines,
        records = summary.records,
        skipped = summary.skipped,
        groups = summary.groups,
        reported = summary.reported,
        "report written"
    );
    Ok(summary)
}

/// Open the input, decompressing it if the name ends in `.gz`.
fn open_input(path: &Path) -> Result<Box<dyn BufRead>, TrendError> {
    let file = File::open(path).map_err(|e| TrendError::file_open(path, e))?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

/// Split on `\n`, drop a trailing `\r`, and replace invalid UTF-8.
fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<String, io::Error>> {
    reader.split(b'\n').map(|line| {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    })
}
