use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use edelbaum_transfer::config::{TransferCaseConfig, find_case, load_transfer_cases};
use edelbaum_transfer::core::constants::MU_EARTH_KM3_S2;
use edelbaum_transfer::core::time::{seconds_to_days, split_duration};
use edelbaum_transfer::core::units::rad_to_deg;
use edelbaum_transfer::export::profile::{Record, write_header, writer_for_path};
use edelbaum_transfer::export::summary::{TransferSummary, write_summary};
use edelbaum_transfer::lowthrust::{EdelbaumTransfer, plan_transfer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Edelbaum low-thrust transfer between circular inclined orbits"
)]
struct Cli {
    /// Transfer manifest (YAML list, TOML file, or directory of TOML files)
    #[arg(long, requires = "case")]
    config: Option<PathBuf>,

    /// Case name within the manifest (case-insensitive)
    #[arg(long, requires = "config")]
    case: Option<String>,

    /// Gravitational parameter in km^3/s^2
    #[arg(long, default_value_t = MU_EARTH_KM3_S2, conflicts_with = "config")]
    mu: f64,

    /// Initial semimajor axis in km
    #[arg(long, conflicts_with = "config")]
    a0: Option<f64>,

    /// Final semimajor axis in km
    #[arg(long, conflicts_with = "config")]
    af: Option<f64>,

    /// Initial inclination in degrees
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        conflicts_with = "config"
    )]
    inc0: f64,

    /// Final inclination in degrees
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        conflicts_with = "config"
    )]
    incf: f64,

    /// Constant thrust acceleration in km/s^2
    #[arg(long, conflicts_with = "config")]
    accel: Option<f64>,

    /// Write the sampled transfer profile as CSV (`-` for stdout)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Number of profile samples (defaults to the manifest value or 200)
    #[arg(long)]
    samples: Option<usize>,

    /// Write a JSON summary of the transfer
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Specific impulse in seconds, used to report the propellant mass fraction
    #[arg(long)]
    isp: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let case = resolve_case(&cli)?;
    info!(case = %case.name, "planning edelbaum transfer");

    let transfer = plan_transfer(&case.to_inputs())
        .with_context(|| format!("transfer '{}' is not computable", case.name))?;
    let propellant_fraction = cli
        .isp
        .map(|isp| transfer.propellant_fraction(isp))
        .transpose()?;

    // Keep stdout clean when the profile CSV is streamed there.
    let profile_to_stdout = cli.profile.as_deref() == Some(Path::new("-"));
    if profile_to_stdout {
        print_report(&mut io::stderr(), &case, &transfer, propellant_fraction)?;
    } else {
        print_report(&mut io::stdout(), &case, &transfer, propellant_fraction)?;
    }

    if let Some(path) = &cli.profile {
        let samples = cli.samples.unwrap_or(case.profile_samples);
        write_profile(path, &transfer, samples)?;
        info!(path = %path.display(), samples, "wrote transfer profile");
    }

    if let Some(path) = &cli.summary {
        let summary = TransferSummary {
            case: &case.name,
            central_body: case.central_body.as_deref(),
            mu_km3_s2: case.mu_km3_s2,
            initial_semimajor_axis_km: case.initial_semimajor_axis_km,
            final_semimajor_axis_km: case.final_semimajor_axis_km,
            initial_inclination_deg: case.initial_inclination_deg,
            final_inclination_deg: case.final_inclination_deg,
            acceleration_km_s2: case.acceleration_km_s2,
            initial_velocity_km_s: transfer.parameters.initial_velocity_km_s,
            final_velocity_km_s: transfer.parameters.final_velocity_km_s,
            initial_yaw_deg: rad_to_deg(transfer.parameters.initial_yaw_rad),
            delta_v_km_s: transfer.delta_v_km_s,
            time_of_flight_s: transfer.time_of_flight_s,
            time_of_flight_days: seconds_to_days(transfer.time_of_flight_s),
            propellant_fraction,
        };
        write_summary(path, &summary)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        info!(path = %path.display(), "wrote transfer summary");
    }

    Ok(())
}

fn resolve_case(cli: &Cli) -> anyhow::Result<TransferCaseConfig> {
    if let (Some(path), Some(name)) = (&cli.config, &cli.case) {
        let cases = load_transfer_cases(path)
            .with_context(|| format!("failed to load transfer cases from {}", path.display()))?;
        return Ok(find_case(&cases, name)?.clone());
    }

    let (Some(a0), Some(af), Some(accel)) = (cli.a0, cli.af, cli.accel) else {
        bail!("either --config/--case or all of --a0, --af and --accel are required");
    };
    Ok(TransferCaseConfig {
        name: "command-line".to_string(),
        central_body: None,
        mu_km3_s2: cli.mu,
        initial_semimajor_axis_km: a0,
        final_semimajor_axis_km: af,
        initial_inclination_deg: cli.inc0,
        final_inclination_deg: cli.incf,
        acceleration_km_s2: accel,
        profile_samples: 200,
    })
}

fn print_report(
    out: &mut dyn Write,
    case: &TransferCaseConfig,
    transfer: &EdelbaumTransfer,
    propellant_fraction: Option<f64>,
) -> io::Result<()> {
    let (d, h, m) = split_duration(transfer.time_of_flight_s);

    writeln!(out, "=== Edelbaum Transfer: {} ===", case.name)?;
    writeln!(
        out,
        "Orbits         : a = {:.3} -> {:.3} km, i = {:.4} -> {:.4} deg",
        case.initial_semimajor_axis_km,
        case.final_semimajor_axis_km,
        case.initial_inclination_deg,
        case.final_inclination_deg
    )?;
    writeln!(
        out,
        "Velocities     : V0 = {:.6} km/s, Vf = {:.6} km/s",
        transfer.parameters.initial_velocity_km_s, transfer.parameters.final_velocity_km_s
    )?;
    writeln!(
        out,
        "Initial yaw    : beta0 = {:.6} deg",
        rad_to_deg(transfer.parameters.initial_yaw_rad)
    )?;
    writeln!(out, "Delta-v        : {:.6} km/s", transfer.delta_v_km_s)?;
    writeln!(
        out,
        "Transfer time  : {:.1} s = {:.3} days ({}d {}h {}m)",
        transfer.time_of_flight_s,
        seconds_to_days(transfer.time_of_flight_s),
        d,
        h,
        m
    )?;
    if let Some(fraction) = propellant_fraction {
        writeln!(out, "Propellant     : {:.4} of initial mass", fraction)?;
    }
    Ok(())
}

fn write_profile(path: &Path, transfer: &EdelbaumTransfer, samples: usize) -> anyhow::Result<()> {
    let states = transfer.profile(samples)?;
    let mut writer = writer_for_path(path)
        .with_context(|| format!("failed to open profile output {}", path.display()))?;
    write_header(writer.as_mut())?;
    for state in &states {
        Record {
            time_s: state.time_s,
            yaw_deg: rad_to_deg(state.yaw_rad),
            velocity_km_s: state.velocity_km_s,
            semimajor_axis_km: state.semimajor_axis_km,
            inclination_deg: rad_to_deg(state.inclination_rad),
            delta_inc_deg: rad_to_deg(state.delta_inclination_rad),
        }
        .write_to(writer.as_mut())?;
    }
    writer.flush()?;
    Ok(())
}
