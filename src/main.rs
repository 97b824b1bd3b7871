use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use patient_screen::utils::logging::console;
use patient_screen::utils::logging::{create_spinner, finish_and_clear};
use patient_screen::{DashboardConfig, LookupError, LookupService, Record, RuleInput, evaluate};

#[derive(Parser, Debug)]
#[command(
    name = "patient-screen",
    version,
    about = "Preview a patient dataset, look up patients, and screen inputs for adrenal/thyroid disorders and chronic kidney disease."
)]
struct Cli {
    /// Path to the `.csv` or `.parquet` data file
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the first rows of the dataset
    Preview {
        /// Number of rows to show
        #[arg(long)]
        rows: Option<usize>,
    },
    /// Look up a patient by Patient_Number
    Lookup {
        patient_id: i64,

        /// Also apply the screening rules to the stored values
        #[arg(long)]
        with_rules: bool,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Screen manually entered values against the fixed rules
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Blood pressure abnormality (0 = No, 1 = Yes)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    blood_pressure_abnormality: u8,

    /// Level of hemoglobin (g/dL)
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    hemoglobin: f64,

    /// Genetic pedigree coefficient
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    genetic_pedigree: f64,

    #[arg(long, default_value_t = 0)]
    age: u32,

    /// BMI (kg/m^2)
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    bmi: f64,

    /// Sex (0 = Female, 1 = Male)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    sex: u8,

    /// Pregnancy (0 = No, 1 = Yes)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pregnancy: u8,

    /// Smoking (0 = No, 1 = Yes)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    smoking: u8,

    /// Physical activity (hours per week)
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    physical_activity: f64,

    /// Salt content in diet (g/day)
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    salt: f64,

    /// Alcohol consumption (units/day)
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    alcohol: f64,

    /// Level of stress (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    stress: u8,

    /// Print the assessment as JSON
    #[arg(long)]
    json: bool,
}

impl From<&EvaluateArgs> for RuleInput {
    fn from(args: &EvaluateArgs) -> Self {
        Self {
            blood_pressure_abnormality: args.blood_pressure_abnormality,
            hemoglobin_level: args.hemoglobin,
            genetic_pedigree_coefficient: args.genetic_pedigree,
            age: args.age,
            bmi: args.bmi,
            sex: args.sex,
            pregnancy: args.pregnancy,
            smoking: args.smoking,
            physical_activity_hours: args.physical_activity,
            salt_intake: args.salt,
            alcohol_units: args.alcohol,
            stress_level: args.stress,
        }
    }
}

fn non_negative(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{raw} is not a finite, non-negative number"))
    }
}

/// Ids outside the loaded range are rejected before the lookup runs
fn lookup_patient(service: &LookupService, patient_id: i64) -> Result<&Record, LookupError> {
    service.check_in_range(patient_id)?;
    service.find_by_id(patient_id)
}

fn resolve_config(cli: &Cli) -> anyhow::Result<DashboardConfig> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_toml_file(path)?,
        None => DashboardConfig::default(),
    };
    let mut config = config.with_env_overrides();

    if let Some(data) = &cli.data {
        config.data_path.clone_from(data);
    }
    if let Command::Preview { rows: Some(rows) } = &cli.command {
        config.preview_rows = *rows;
    }

    config.validate()?;
    Ok(config)
}

fn load_service(config: &DashboardConfig) -> anyhow::Result<LookupService> {
    let spinner = create_spinner(Some("Loading patient data"));
    let loaded = patient_screen::load(&config.data_path, config);
    finish_and_clear(&spinner);

    let dataset = loaded
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    Ok(LookupService::new(Arc::new(dataset)))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match &cli.command {
        Command::Evaluate(args) => {
            let assessment = evaluate(&RuleInput::from(args));
            if args.json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", console::format_assessment(&assessment));
            }
        }
        Command::Preview { .. } => {
            let service = load_service(&config)?;
            info!("Dataset has {} rows", service.dataset().len());
            print!(
                "{}",
                console::format_preview(service.dataset().head(config.preview_rows))
            );
        }
        Command::Lookup {
            patient_id,
            with_rules,
            json,
        } => {
            let service = load_service(&config)?;
            match lookup_patient(&service, *patient_id) {
                Ok(record) if *json => println!("{}", serde_json::to_string_pretty(record)?),
                Ok(record) => {
                    println!("Patient details for Patient_Number {patient_id}:");
                    print!("{}", console::format_record(record));
                    println!("\nDiagnosis:");
                    print!("{}", console::format_recorded_diagnosis(record));
                    if *with_rules {
                        println!("\nScreening rules:");
                        print!(
                            "{}",
                            console::format_assessment(&evaluate(&RuleInput::from(record)))
                        );
                    }
                }
                Err(err @ LookupError::OutOfRange { .. }) => warn!("{err}"),
                Err(LookupError::NotFound { .. }) => {
                    warn!("No patient found with the given Patient_Number.");
                }
            }
        }
    }

    Ok(())
}
