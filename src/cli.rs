use crate::commands::{self, PairOutcome};
use clap::{Args, Parser, Subcommand};
use course_sequence::analytics::sequence::{AcademicPeriod, SectionPreset, SequencePlan};
use course_sequence::config::{parse_term, AppConfig, ReportConfig};
use course_sequence::error::AppError;
use course_sequence::telemetry;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Course Sequence Report",
    about = "Report pass rates in a course by how students completed its prerequisite",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one course pair and write its CSV report
    Analyze(AnalyzeArgs),
    /// Analyze every course pair listed in a plan file
    Batch(BatchArgs),
    /// Print student counts for one course pair without writing a report
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct PairArgs {
    /// Prerequisite course, e.g. MATH117
    #[arg(long)]
    first: String,
    /// Course whose outcomes are reported, e.g. MATH160
    #[arg(long)]
    second: String,
    /// Sections of the first course that count as local completions
    #[arg(long, value_parser = parse_preset, default_value = "all")]
    first_sections: SectionPreset,
    /// Sections of the second course that are analyzed
    #[arg(long, value_parser = parse_preset, default_value = "all")]
    second_sections: SectionPreset,
}

impl PairArgs {
    fn plan(&self) -> SequencePlan {
        SequencePlan {
            first_course: self.first.clone(),
            second_course: self.second.clone(),
            first_sections: self.first_sections,
            second_sections: self.second_sections,
        }
    }
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Enrollment export to read (defaults to SEQ_DATA_DIR/enrollments.json)
    #[arg(long)]
    enrollments: Option<PathBuf>,
    /// First term of the report range (YYYYNN)
    #[arg(long, value_parser = parse_term_arg)]
    start_term: Option<AcademicPeriod>,
    /// Last term of the report range (YYYYNN)
    #[arg(long, value_parser = parse_term_arg)]
    end_term: Option<AcademicPeriod>,
    /// Directory for written reports
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    pair: PairArgs,
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV plan with columns first,second,first_sections,second_sections
    #[arg(long)]
    plan: PathBuf,
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    pair: PairArgs,
    #[command(flatten)]
    source: SourceArgs,
    /// Print the counts as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "course sequence report starting");

    match cli.command {
        Command::Analyze(args) => run_analyze(args, config.report),
        Command::Batch(args) => run_batch(args, config.report),
        Command::Summary(args) => run_summary(args, config.report),
    }
}

fn parse_preset(raw: &str) -> Result<SectionPreset, String> {
    SectionPreset::parse(raw).ok_or_else(|| {
        format!("unknown section preset '{raw}' (expected in-person, online, all, or special)")
    })
}

fn parse_term_arg(raw: &str) -> Result<AcademicPeriod, String> {
    parse_term("term", raw).map_err(|err| err.to_string())
}

/// Applies command-line overrides and resolves the enrollment export path.
fn prepare(
    source: SourceArgs,
    mut report: ReportConfig,
) -> Result<(ReportConfig, PathBuf), AppError> {
    report.apply_overrides(source.start_term, source.end_term, source.out.as_deref())?;
    let enrollments = source
        .enrollments
        .unwrap_or_else(|| report.enrollments_path());
    Ok((report, enrollments))
}

fn run_analyze(args: AnalyzeArgs, report: ReportConfig) -> Result<(), AppError> {
    let (report, enrollments) = prepare(args.source, report)?;
    let corpus = commands::load_corpus(&enrollments)?;
    let outcome = commands::write_pair(&corpus, &args.pair.plan(), &report)?;
    print_written(&outcome);
    Ok(())
}

fn run_batch(args: BatchArgs, report: ReportConfig) -> Result<(), AppError> {
    let (report, enrollments) = prepare(args.source, report)?;
    let plans = SequencePlan::from_path(&args.plan)?;
    let corpus = commands::load_corpus(&enrollments)?;
    for outcome in commands::write_batch(&corpus, &plans, &report)? {
        print_written(&outcome);
    }
    Ok(())
}

fn run_summary(args: SummaryArgs, report: ReportConfig) -> Result<(), AppError> {
    let (report, enrollments) = prepare(args.source, report)?;
    let corpus = commands::load_corpus(&enrollments)?;
    let outcome = commands::summarize(&corpus, &args.pair.plan(), &report);

    if args.json {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &outcome).map_err(std::io::Error::from)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let counts = outcome.counts;
    println!(
        "{} students took {}",
        counts.with_second, outcome.second_course
    );
    println!(
        "{} had credit for {} in the prior term",
        counts.with_first_prior, outcome.first_course
    );
    println!(
        "{} had credit for {} in any earlier term",
        counts.with_first_any, outcome.first_course
    );
    Ok(())
}

fn print_written(outcome: &PairOutcome) {
    if let Some(path) = &outcome.report_path {
        println!(
            "{} -> {}: {} students, report written to {}",
            outcome.first_course,
            outcome.second_course,
            outcome.counts.with_second,
            path.display()
        );
    }
}
