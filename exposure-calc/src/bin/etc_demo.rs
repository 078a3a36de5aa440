//! Estimate photon rate, SNR and required NDIT for a single target

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use exposure_calc::hardware::models::HAWKI;
use exposure_calc::units::{Angle, AngleExt, Time, TimeExt};
use exposure_calc::{ExposureTimeCalculator, InstrumentProfile, Magnitude, SearchOutcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MagSystem {
    Vega,
    Ab,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Exposure time calculator for near-IR imaging")]
struct Args {
    /// Band identifier (e.g. Ks, J, H2, BrGamma)
    #[arg(long, default_value = "H2")]
    band: String,

    /// Target magnitude
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    magnitude: f64,

    /// Photometric system of the magnitude
    #[arg(long, value_enum, default_value_t = MagSystem::Vega)]
    system: MagSystem,

    /// Integration time of a single exposure in seconds
    #[arg(long, default_value_t = 10.0)]
    dit: f64,

    /// Number of exposures for the SNR estimate
    #[arg(long, default_value_t = 60)]
    ndit: u32,

    /// Target SNR for the NDIT search
    #[arg(long, default_value_t = 10.0)]
    snr: f64,

    /// Seeing in arcseconds
    #[arg(long, default_value_t = 1.0)]
    seeing: f64,

    /// Fraction of lunar illumination (0-1)
    #[arg(long, default_value_t = 0.5)]
    moon: f64,

    /// Airmass of the observation
    #[arg(long, default_value_t = 1.5)]
    airmass: f64,

    /// Instrument profile JSON (defaults to HAWK-I)
    #[arg(long)]
    instrument: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let instrument = match &args.instrument {
        Some(path) => InstrumentProfile::load_from_file(path)
            .with_context(|| format!("loading instrument profile {}", path.display()))?,
        None => HAWKI.clone(),
    };

    let magnitude = match args.system {
        MagSystem::Vega => Magnitude::vega(args.magnitude),
        MagSystem::Ab => Magnitude::ab(args.magnitude),
    };
    let dit = Time::from_seconds(args.dit);

    let mut etc = ExposureTimeCalculator::new(instrument);
    etc.set_conditions(Angle::from_arcseconds(args.seeing), args.moon, args.airmass)?;

    println!(
        "{} @ {}: {} in {}, DIT {} s",
        etc.instrument().name,
        etc.instrument().observatory,
        magnitude,
        args.band,
        args.dit
    );

    let rate = etc.photon_rate(&args.band, magnitude)?;
    println!("Photon rate:       {rate}");

    let snr = etc.signal_to_noise(&args.band, magnitude, dit, args.ndit)?;
    println!("SNR at NDIT={:<5}  {snr:.3}", args.ndit);

    let estimate = etc.estimate_ndit(&args.band, args.snr, magnitude, dit)?;
    match estimate.outcome {
        SearchOutcome::TargetReached => println!(
            "NDIT for SNR {}:   {} ({:.2} h, SNR {:.3})",
            args.snr,
            estimate.ndit,
            estimate.total_time.as_hours(),
            estimate.snr
        ),
        SearchOutcome::TimeCapReached => println!(
            "NDIT for SNR {}:   not reached, stopped at {} ({:.2} h, SNR {:.3})",
            args.snr,
            estimate.ndit,
            estimate.total_time.as_hours(),
            estimate.snr
        ),
    }

    let advisories = etc.take_advisories();
    if !advisories.is_empty() {
        println!("Advisories:");
        for advisory in advisories {
            println!("  - {advisory}");
        }
    }

    Ok(())
}
