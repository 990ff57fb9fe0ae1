extern crate heatcalc;

use anyhow::anyhow;
use clap::Parser;
use heatcalc::output::FileOutput;
use heatcalc::{run_project, CalculationResults, EnergyAssumptions, ProjectFlags};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct HeatcalcArgs {
    #[arg(help = "Path to a heat pump or solar PV input file in .json format")]
    input_file: String,
    #[arg(
        long,
        short,
        help = "Path to an energy assumptions file in .json format (defaults to UK 2025 figures)"
    )]
    assumptions: Option<String>,
    #[arg(long, default_value_t = false, help = "Write the full results as JSON")]
    json: bool,
    #[arg(long, default_value_t = false, help = "Write a CSV summary of headline figures")]
    csv: bool,
    #[arg(
        long,
        default_value_t = false,
        help = "Write the fuel comparison or PV degradation curve as CSV"
    )]
    breakdown: bool,
    #[clap(long, default_value_t = false, help = "Log calculation detail")]
    verbose: bool,
}

impl HeatcalcArgs {
    fn project_flags(&self) -> ProjectFlags {
        let mut flags = ProjectFlags::empty();
        flags.set(ProjectFlags::JSON_RESULTS, self.json);
        flags.set(ProjectFlags::CSV_SUMMARY, self.csv);
        flags.set(ProjectFlags::BREAKDOWN_CSV, self.breakdown);
        flags
    }
}

fn main() -> anyhow::Result<()> {
    let args = HeatcalcArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input_path = Path::new(args.input_file.as_str());
    let input_file_stem = input_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("Could not read a file name from {}", args.input_file))?;
    let output_directory = input_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let file_output = FileOutput::new(
        output_directory,
        format!("{input_file_stem}__{{}}.{{}}"),
    );

    let assumptions = match args.assumptions {
        Some(ref file) => Some(EnergyAssumptions::from_json(File::open(file)?)?),
        None => None,
    };

    let results = run_project(
        BufReader::new(File::open(input_path)?),
        &file_output,
        assumptions,
        &args.project_flags(),
    )?;
    info!("calculation complete for {}", args.input_file);

    match results {
        CalculationResults::HeatPump {
            results,
            recommendations,
        } => {
            println!(
                "Design heat load {:.2} kW, COP {:.2}, annual cost £{:.0}",
                results.total_heat_load, results.cop, results.annual_cost
            );
            for finding in &results.review_findings {
                println!("[{}] {}", finding.finding_type, finding.title);
            }
            for recommendation in recommendations {
                println!("- {recommendation}");
            }
        }
        CalculationResults::SolarPv(results) => {
            println!(
                "Annual generation {:.0} kWh, savings £{:.0} a year, payback {}",
                results.annual_generation,
                results.annual_savings,
                results
                    .payback_years
                    .map_or_else(|| "not reached".to_string(), |years| format!("{years} years"))
            );
        }
    }

    Ok(())
}
