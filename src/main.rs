use clap::{Parser, Subcommand};
use ecocalc::config::Config;
use ecocalc::fuel::{self, Measurement, TestCycle};
use ecocalc::present;
use ecocalc::vehicle::{Category, Powertrain, ProfileBuilder};
use ecocalc::wizard::console;
use ecocalc::CalcError;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "ecocalc.toml";

#[derive(Parser)]
#[command(name = "ecocalc")]
#[command(about = "2030 fuel economy standard achievement calculator", long_about = None)]
struct Cli {
    /// Config file (default: ecocalc.toml in the working directory, if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a vehicle against its fuel economy target
    Rate {
        /// Fuel economy in km/L, optionally tagged (e.g. "21.4", "12.0 jc08")
        measurement: String,

        /// Vehicle weight in kg
        #[arg(short, long)]
        weight: f64,

        /// Vehicle category (compact, sedan, suv, minivan, sports, kei)
        #[arg(long)]
        category: Option<Category>,

        /// Powertrain (gasoline, hev, phev, diesel, lpg)
        #[arg(short, long)]
        powertrain: Option<Powertrain>,

        /// Test cycle of the measurement (wltc, jc08, 1015)
        #[arg(short, long)]
        unit: Option<TestCycle>,

        /// Print share text after the result
        #[arg(long)]
        share: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a legacy test-cycle figure to WLTC
    Convert {
        /// Fuel economy in km/L
        value: f64,

        /// Test cycle of the value (wltc, jc08, 1015)
        #[arg(short, long, default_value = "jc08")]
        unit: TestCycle,
    },

    /// Show the fuel economy target for a weight and powertrain
    Target {
        /// Vehicle weight in kg
        #[arg(short, long)]
        weight: f64,

        /// Powertrain (gasoline, hev, phev, diesel, lpg)
        #[arg(short, long, default_value = "gasoline")]
        powertrain: Powertrain,
    },

    /// Step through the calculator interactively
    Wizard,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Rate {
            measurement,
            weight,
            category,
            powertrain,
            unit,
            share,
            json,
        } => rate_vehicle(
            &config,
            &measurement,
            weight,
            category,
            powertrain,
            unit,
            share,
            json,
        ),
        Commands::Convert { value, unit } => convert_value(&config, value, unit),
        Commands::Target { weight, powertrain } => show_target(&config, weight, powertrain),
        Commands::Wizard => run_wizard(&config),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::load_from_file(DEFAULT_CONFIG_FILE)?
        }
        None => Config::empty(),
    };
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn rate_vehicle(
    config: &Config,
    measurement_str: &str,
    weight: f64,
    category: Option<Category>,
    powertrain: Option<Powertrain>,
    unit: Option<TestCycle>,
    share: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (value, tagged_unit) = fuel::parse_measurement(measurement_str).ok_or_else(|| {
        CalcError::InvalidArgument(format!(
            "'{}' is not a fuel economy figure",
            measurement_str
        ))
    })?;
    let unit = unit.or(tagged_unit).unwrap_or(config.defaults.unit);

    config.limits.check_measurement(value)?;
    let measurement = Measurement::new(value, unit)?;

    let mut builder = ProfileBuilder::new().weight(weight);
    if let Some(category) = category {
        builder = builder.category(category);
    }
    if let Some(powertrain) = powertrain {
        builder = builder.powertrain(powertrain);
    }
    let (profile, validation) = builder.finalize(config)?;

    // Print validation issues if any
    if validation.has_issues() {
        eprintln!("{}", validation);
    }

    let result = fuel::evaluate(&measurement, &profile);
    log::debug!("Rating result: {:?}", result);

    if json {
        let report = serde_json::json!({
            "profile": profile,
            "measurement": measurement,
            "result": result,
            "message": present::message_text(&result.message_key),
        });
        println!("{}", present::format_json(&report));
    } else {
        println!("{}", present::format_summary(&result, &profile, &measurement));
    }

    if share {
        println!("\n{}", present::share_text(&result, profile.category, &config.share));
    }

    Ok(())
}

fn convert_value(
    config: &Config,
    value: f64,
    unit: TestCycle,
) -> Result<(), Box<dyn std::error::Error>> {
    config.limits.check_measurement(value)?;
    let measurement = Measurement::new(value, unit)?;
    println!(
        "{} km/L ({}) = {} km/L (WLTC)",
        measurement.value(),
        unit,
        present::format_figure(measurement.to_reference())
    );
    Ok(())
}

fn show_target(
    config: &Config,
    weight: f64,
    powertrain: Powertrain,
) -> Result<(), Box<dyn std::error::Error>> {
    config.limits.check_weight(weight)?;

    let target = fuel::estimate(weight, powertrain);
    println!(
        "Target for {} kg ({}): {} km/L (WLTC)",
        weight,
        present::powertrain_name(powertrain),
        present::format_figure(target)
    );
    Ok(())
}

fn run_wizard(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    console::run(stdin.lock(), &mut stdout, config)?;
    Ok(())
}
