use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::{
    api::HttpClient,
    domain::{AppError, Category, Result, RunReport, Sample},
    utils::format_human_size,
};

use super::{report_log::append_report, sampler::Sampler};

/// How a `test` run should be carried out and reported
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub category: Category,
    pub repetitions: usize,
    pub silent: bool,
    pub json: bool,
    pub log_file: Option<PathBuf>,
}

/// Drives repeated samples and turns them into a report
pub struct RunAggregator<C> {
    sampler: Sampler<C>,
}

impl<C: HttpClient> RunAggregator<C> {
    pub fn new(sampler: Sampler<C>) -> Self {
        Self { sampler }
    }

    /// Take `repetitions` samples one after another.
    ///
    /// `on_sample` is called with the 1-based index after each sample. The
    /// first failure ends the run and nothing gathered so far is returned.
    pub async fn run<F>(
        &self,
        category: Category,
        repetitions: usize,
        mut on_sample: F,
    ) -> Result<RunReport>
    where
        F: FnMut(usize, &Sample) -> Result<()>,
    {
        check_repetitions(repetitions)?;

        let started_at = Local::now();
        let mut samples = Vec::with_capacity(repetitions);
        for index in 1..=repetitions {
            let sample = self.sampler.sample(category).await?;
            on_sample(index, &sample)?;
            samples.push(sample);
        }

        let report = RunReport::new(started_at, samples)?;
        info!(
            %category,
            started_at = %report.started_at().format("%Y-%m-%d %H:%M:%S"),
            samples = report.samples().len(),
            mean_speed_mbps = report.mean_speed_mbps(),
            "run complete"
        );
        Ok(report)
    }

    /// Run a full `test`: progress on `out`, optional log append, then the report
    pub async fn execute<W: Write>(&self, options: &RunOptions, out: &mut W) -> Result<RunReport> {
        check_repetitions(options.repetitions)?;
        let total = options.repetitions;
        let silent = options.silent;

        if !silent {
            writeln!(
                out,
                "Running {} test(s). Using {} filesize.",
                total, options.category
            )?;
            write!(out, "Tests completed: ")?;
            out.flush()?;
        }

        let report = self
            .run(options.category, total, |index, _| {
                if !silent {
                    let separator = if index == total { '\n' } else { ' ' };
                    write!(out, "{}{}", index, separator)?;
                    out.flush()?;
                }
                Ok(())
            })
            .await?;

        if let Some(path) = &options.log_file {
            append_report(path, &report).await?;
            if !silent {
                writeln!(out, "Tests saved to logfile: {}", path.display())?;
            }
        }

        if !silent {
            if options.json {
                serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::from)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", report)?;
            }
        }

        Ok(report)
    }

    /// One small-file sample, printed on a single line
    pub async fn quick<W: Write>(&self, out: &mut W) -> Result<Sample> {
        writeln!(out, "Running a quick speedtest.")?;
        out.flush()?;

        let sample = self.sampler.sample(Category::Small).await?;
        writeln!(
            out,
            "{:.2} Mbps\t{} in {:.1} s",
            sample.speed_mbps(),
            format_human_size(sample.bytes_downloaded()),
            sample.duration_seconds()
        )?;
        Ok(sample)
    }
}

fn check_repetitions(repetitions: usize) -> Result<()> {
    if repetitions == 0 {
        return Err(AppError::InvalidConfiguration(
            "number of tests must be at least 1".to_string(),
        ));
    }
    Ok(())
}
