mod error;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tl_core::units::k_to_celsius;
use tl_fluids::{
    ActivityModel, Component, EosModel, GasProperties, Quantity, SatKey, Substance, ThermoState,
    eos_state, ideal_gas_state, mixture_curve, parse_quantity, saturation_lookup, water_state,
};
use tl_process::{
    BalanceInputs, ClosedProcess, ClosedSystem, CycleDefinition, FlowDevice, FlowSpec,
    HeatEngine, Scenario, Unknown, WorkConvention, audit_engine, closed_process, run_cycle,
    solve_balance, solve_device,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thermolab")]
#[command(about = "ThermoLab CLI - thermodynamic properties and process balances", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Water/steam state from any of P, T and quality
    Water {
        /// Pressure (e.g. "101.325 kPa", "8 MPa")
        #[arg(short, long)]
        p: Option<String>,
        /// Temperature (e.g. "373.15 K", "100C")
        #[arg(short, long)]
        t: Option<String>,
        /// Quality (e.g. "0.5", "50%")
        #[arg(short, long)]
        x: Option<String>,
    },
    /// Ideal-gas state
    IdealGas {
        #[arg(short, long)]
        p: String,
        #[arg(short, long)]
        t: String,
        /// Gas constant [kJ/(kg·K)]
        #[arg(long, default_value_t = GasProperties::AIR.r)]
        r: f64,
        /// Constant-pressure specific heat [kJ/(kg·K)]
        #[arg(long, default_value_t = GasProperties::AIR.cp)]
        cp: f64,
    },
    /// Equation-of-state volume and compressibility for a component
    Eos {
        #[arg(short, long)]
        p: String,
        #[arg(short, long)]
        t: String,
        /// Component name or formula (Water, Ethanol, CH4, ...)
        #[arg(short, long, default_value = "Water")]
        component: String,
        /// "ideal" or "peng-robinson"
        #[arg(short, long, default_value = "peng-robinson")]
        model: String,
        /// Gas constant [kJ/(kg·K)]
        #[arg(long)]
        r: Option<f64>,
    },
    /// Saturation table lookup by temperature or pressure
    Sat {
        #[arg(short, long, conflicts_with = "p", required_unless_present = "p")]
        t: Option<String>,
        #[arg(short, long)]
        p: Option<String>,
    },
    /// Antoine vapor pressure of a component
    Antoine {
        #[arg(short, long)]
        component: String,
        #[arg(short, long)]
        t: String,
    },
    /// Binary mixture VLE and mixing energies
    Mixture {
        #[arg(short, long)]
        a: String,
        #[arg(short, long)]
        b: String,
        #[arg(short, long)]
        t: String,
        /// Margules A (defaults to the interaction database)
        #[arg(long)]
        margules: Option<f64>,
        /// "ideal" or "regular"
        #[arg(long, default_value = "regular")]
        model: String,
        #[arg(long, default_value_t = tl_fluids::mixture::DEFAULT_STEP)]
        step: f64,
        /// Only report the grid point at this liquid composition
        #[arg(long)]
        x: Option<f64>,
    },
    /// Run the default Rankine cycle
    Cycle,
    /// Steady-flow device balance
    Device {
        /// turbine, compressor, pump, nozzle, valve, heat-exchanger
        device: String,
        #[arg(long, default_value = "air")]
        substance: String,
        #[arg(long)]
        p1: String,
        #[arg(long)]
        t1: String,
        #[arg(long)]
        p2: String,
        #[arg(long, default_value = "1.0")]
        eta: String,
        #[arg(long, requires = "v2")]
        v1: Option<String>,
        #[arg(long, requires = "v1")]
        v2: Option<String>,
        #[arg(long, requires = "z2")]
        z1: Option<String>,
        #[arg(long, requires = "z1")]
        z2: Option<String>,
    },
    /// Closed-system first law for a constrained process
    Closed {
        /// isothermal, isobaric or isochoric
        process: String,
        #[arg(long, default_value = "air")]
        substance: String,
        #[arg(short, long, default_value = "1 kg")]
        m: String,
        #[arg(long)]
        p1: String,
        #[arg(long)]
        t1: String,
        #[arg(long)]
        p2: String,
        /// Report work done on the system as positive
        #[arg(long)]
        work_on_system: bool,
    },
    /// Solve Q - W = m·cv·(T2 - T1) for one unknown
    Balance {
        /// t1, t2, mass, heat or work
        unknown: String,
        #[arg(long, default_value = "air")]
        substance: String,
        #[arg(long, default_value = "298.15 K")]
        t1: String,
        #[arg(long, default_value = "298.15 K")]
        t2: String,
        #[arg(short, long, default_value = "1 kg")]
        m: String,
        #[arg(short, long, default_value = "0 kJ")]
        q: String,
        #[arg(short, long, default_value = "0 kJ")]
        w: String,
    },
    /// Second-law audit of a heat engine
    Engine {
        #[arg(long, default_value = "800 K")]
        th: String,
        #[arg(long, default_value = "300 K")]
        tl: String,
        #[arg(long, default_value = "298.15 K")]
        t0: String,
        #[arg(long, default_value = "100 kJ")]
        qh: String,
        #[arg(long, default_value = "40 kJ")]
        w: String,
    },
    /// Validate and evaluate a worksheet file (YAML or JSON)
    Worksheet {
        path: PathBuf,
        /// Only validate, do not evaluate
        #[arg(long)]
        check: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let json = cli.json;
    match cli.command {
        Commands::Water { p, t, x } => cmd_water(p.as_deref(), t.as_deref(), x.as_deref(), json),
        Commands::IdealGas { p, t, r, cp } => cmd_ideal_gas(&p, &t, GasProperties { r, cp }, json),
        Commands::Eos {
            p,
            t,
            component,
            model,
            r,
        } => cmd_eos(&p, &t, &component, &model, r, json),
        Commands::Sat { t, p } => cmd_sat(t.as_deref(), p.as_deref(), json),
        Commands::Antoine { component, t } => cmd_antoine(&component, &t, json),
        Commands::Mixture {
            a,
            b,
            t,
            margules,
            model,
            step,
            x,
        } => cmd_mixture(&a, &b, &t, margules, &model, step, x, json),
        Commands::Cycle => emit(&run_cycle(&CycleDefinition::rankine())?, json, print_cycle),
        Commands::Device {
            device,
            substance,
            p1,
            t1,
            p2,
            eta,
            v1,
            v2,
            z1,
            z2,
        } => {
            let mut spec = FlowSpec::new(
                device.parse::<FlowDevice>()?,
                substance.parse::<Substance>()?,
                quantity(&p1, Quantity::Pressure)?,
                quantity(&t1, Quantity::Temperature)?,
                quantity(&p2, Quantity::Pressure)?,
            )
            .with_efficiency(quantity(&eta, Quantity::Dimensionless)?);
            if let (Some(v1), Some(v2)) = (v1, v2) {
                spec = spec.with_velocities(
                    quantity(&v1, Quantity::Velocity)?,
                    quantity(&v2, Quantity::Velocity)?,
                );
            }
            if let (Some(z1), Some(z2)) = (z1, z2) {
                spec = spec.with_elevations(
                    quantity(&z1, Quantity::Length)?,
                    quantity(&z2, Quantity::Length)?,
                );
            }
            emit(&solve_device(&spec)?, json, |r| {
                println!("{} ({})", r.equation, r.outlet.phase);
                println!("  inlet:  {}", r.inlet.summary());
                println!("  outlet: {}", r.outlet.summary());
                println!("  w = {:.3} kJ/kg, q = {:.3} kJ/kg", r.w, r.q);
                if let Some(v) = r.exit_velocity {
                    println!("  exit velocity = {v:.2} m/s");
                }
            })
        }
        Commands::Closed {
            process,
            substance,
            m,
            p1,
            t1,
            p2,
            work_on_system,
        } => {
            let system = ClosedSystem {
                substance: substance.parse()?,
                process: process.parse::<ClosedProcess>()?,
                mass_kg: quantity(&m, Quantity::Mass)?,
                p1_kpa: quantity(&p1, Quantity::Pressure)?,
                t1_k: quantity(&t1, Quantity::Temperature)?,
                p2_kpa: quantity(&p2, Quantity::Pressure)?,
                convention: if work_on_system {
                    WorkConvention::OnSystem
                } else {
                    WorkConvention::BySystem
                },
            };
            emit(&closed_process(&system)?, json, |r| {
                println!("  state 1: {}", r.initial.summary());
                println!("  state 2: {}", r.final_state.summary());
                println!("  ΔU = {:.3} kJ, Q = {:.3} kJ, W = {:.3} kJ", r.delta_u, r.q, r.w);
            })
        }
        Commands::Balance {
            unknown,
            substance,
            t1,
            t2,
            m,
            q,
            w,
        } => {
            let inputs = BalanceInputs {
                scenario: Scenario::PistonCylinder,
                substance: substance.parse()?,
                unknown: unknown.parse::<Unknown>()?,
                t1_k: quantity(&t1, Quantity::Temperature)?,
                t2_k: quantity(&t2, Quantity::Temperature)?,
                mass_kg: quantity(&m, Quantity::Mass)?,
                q_kj: quantity(&q, Quantity::Energy)?,
                w_kj: quantity(&w, Quantity::Energy)?,
            };
            emit(&solve_balance(&inputs)?, json, |s| {
                println!("{}", s.equation);
                println!("  {:?} = {:.4} {}", s.unknown, s.value, s.unit);
            })
        }
        Commands::Engine { th, tl, t0, qh, w } => {
            let engine = HeatEngine {
                th_k: quantity(&th, Quantity::Temperature)?,
                tl_k: quantity(&tl, Quantity::Temperature)?,
                t0_k: quantity(&t0, Quantity::Temperature)?,
                qh_kj: quantity(&qh, Quantity::Energy)?,
                w_kj: quantity(&w, Quantity::Energy)?,
            };
            emit(&audit_engine(&engine), json, |a| {
                println!("  QL = {:.3} kJ", a.ql_kj);
                println!(
                    "  η_th = {:.4}, η_Carnot = {:.4}",
                    a.thermal_efficiency, a.carnot_efficiency
                );
                println!(
                    "  S_gen = {:.5} kJ/K, X_dest = {:.3} kJ",
                    a.s_gen, a.exergy_destroyed
                );
                if a.impossible {
                    println!("  ✗ violates the second law");
                } else {
                    println!("  ✓ possible");
                }
            })
        }
        Commands::Worksheet { path, check } => cmd_worksheet(&path, check, json),
    }
}

fn quantity(text: &str, quantity: Quantity) -> CliResult<f64> {
    Ok(parse_quantity(text, quantity).map_err(tl_fluids::FluidError::from)?)
}

fn optional(text: Option<&str>, q: Quantity) -> CliResult<Option<f64>> {
    text.map(|t| quantity(t, q)).transpose()
}

/// Print `value` as JSON or through the human-readable printer.
fn emit<T: Serialize>(value: &T, json: bool, human: impl FnOnce(&T)) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn print_state(state: &ThermoState) {
    println!("{}", state.phase);
    println!("  {}", state.summary());
    if let Some(z) = state.z {
        println!("  Z = {z:.5}");
    }
    if let (Some(phi), Some(f)) = (state.phi, state.f) {
        println!("  φ = {phi:.5}, f = {f:.3} kPa");
    }
    if let Some(x) = state.x {
        println!("  x = {x:.4}");
    }
}

fn cmd_water(p: Option<&str>, t: Option<&str>, x: Option<&str>, json: bool) -> CliResult<()> {
    let state = water_state(
        optional(p, Quantity::Pressure)?,
        optional(t, Quantity::Temperature)?,
        optional(x, Quantity::Quality)?,
    );
    emit(&state, json, print_state)
}

fn cmd_ideal_gas(p: &str, t: &str, gas: GasProperties, json: bool) -> CliResult<()> {
    let state = ideal_gas_state(
        quantity(p, Quantity::Pressure)?,
        quantity(t, Quantity::Temperature)?,
        gas,
    );
    emit(&state, json, print_state)
}

fn cmd_eos(
    p: &str,
    t: &str,
    component: &str,
    model: &str,
    r: Option<f64>,
    json: bool,
) -> CliResult<()> {
    let component: Component = component.parse()?;
    let model: EosModel = model.parse()?;
    let state = eos_state(
        quantity(p, Quantity::Pressure)?,
        quantity(t, Quantity::Temperature)?,
        model,
        &component.data().critical(),
        r,
    );
    emit(&state, json, print_state)
}

fn cmd_sat(t: Option<&str>, p: Option<&str>, json: bool) -> CliResult<()> {
    let row = match (t, p) {
        (Some(t), _) => saturation_lookup(
            SatKey::Temperature,
            k_to_celsius(quantity(t, Quantity::Temperature)?),
        ),
        (None, Some(p)) => saturation_lookup(SatKey::Pressure, quantity(p, Quantity::Pressure)?),
        (None, None) => return Err(CliError::Usage("give either --t or --p")),
    };
    emit(&row, json, |r| {
        println!("Saturation at {:.2} °C / {:.3} kPa", r.t_c, r.p_kpa);
        println!("  vf = {:.6}  vg = {:.4} m³/kg", r.vf, r.vg);
        println!("  hf = {:.1}  hg = {:.1} kJ/kg", r.hf, r.hg);
        println!("  sf = {:.4}  sg = {:.4} kJ/(kg·K)", r.sf, r.sg);
    })
}

#[derive(Serialize)]
struct AntoineReport {
    component: Component,
    t_c: f64,
    psat_mmhg: f64,
    psat_kpa: f64,
    in_range: bool,
}

fn cmd_antoine(component: &str, t: &str, json: bool) -> CliResult<()> {
    let component: Component = component.parse()?;
    let t_c = k_to_celsius(quantity(t, Quantity::Temperature)?);
    let params = component.data().antoine;
    let report = AntoineReport {
        component,
        t_c,
        psat_mmhg: params.psat_mmhg(t_c),
        psat_kpa: params.psat_kpa(t_c),
        in_range: params.in_range(t_c),
    };
    emit(&report, json, |r| {
        println!(
            "{} at {:.2} °C: Psat = {:.3} kPa ({:.1} mmHg)",
            r.component, r.t_c, r.psat_kpa, r.psat_mmhg
        );
        if !r.in_range {
            println!("  warning: outside the fitted Antoine range");
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_mixture(
    a: &str,
    b: &str,
    t: &str,
    margules: Option<f64>,
    model: &str,
    step: f64,
    x: Option<f64>,
    json: bool,
) -> CliResult<()> {
    let a: Component = a.parse()?;
    let b: Component = b.parse()?;
    let model: ActivityModel = model.parse()?;
    let margules = margules.unwrap_or_else(|| tl_fluids::default_margules(a, b));
    let t_c = k_to_celsius(quantity(t, Quantity::Temperature)?);
    let curve = mixture_curve(
        &a.data().antoine,
        &b.data().antoine,
        t_c,
        margules,
        model,
        step,
    );

    if let Some(x) = x {
        let point = curve
            .point_near(x)
            .ok_or(CliError::Usage("mixture grid is empty"))?;
        return emit(point, json, |p| {
            println!("{a}/{b} at x_A = {:.3}", p.x_a);
            println!("  y_A = {:.4}, P = {:.3} kPa", p.y_a, p.p_total_kpa);
            println!("  γ_A = {:.4}, γ_B = {:.4}", p.gamma_a, p.gamma_b);
            println!(
                "  ΔH = {:.1}, TΔS = {:.1}, ΔG = {:.1} J/mol",
                p.dh_mix, p.t_ds, p.dg_mix
            );
        });
    }

    emit(&curve, json, |c| {
        println!(
            "{a}/{b} at {:.2} °C (A = {margules:.2}, {model:?}): Psat_A = {:.3} kPa, Psat_B = {:.3} kPa",
            t_c, c.psat_a_kpa, c.psat_b_kpa
        );
        println!("  {:>7} {:>7} {:>10} {:>10}", "x_A", "y_A", "P [kPa]", "ΔG [J/mol]");
        for p in &c.points {
            println!(
                "  {:>7.4} {:>7.4} {:>10.3} {:>10.1}",
                p.x_a, p.y_a, p.p_total_kpa, p.dg_mix
            );
        }
        if c.unstable {
            println!("  warning: phase split expected (A > {})", tl_fluids::UNSTABLE_MARGULES);
        }
    })
}

fn print_cycle(result: &tl_process::CycleResult) {
    for point in &result.points {
        println!(
            "  {:<12} {:<18} w = {:>10.3}  q = {:>10.3}",
            point.name,
            point.state.phase.label(),
            point.work,
            point.heat
        );
    }
    println!("  net work = {:.3} kJ/kg", result.net_work);
    println!("  heat in  = {:.3} kJ/kg", result.heat_in);
    println!("  η        = {:.4}", result.thermal_efficiency);
}

fn cmd_worksheet(path: &Path, check: bool, json: bool) -> CliResult<()> {
    debug!(path = %path.display(), "loading worksheet");
    let worksheet = tl_project::load(path)?;
    if check {
        println!("✓ Worksheet is valid: {}", worksheet.name);
        return Ok(());
    }

    let report = tl_project::evaluate(&worksheet)?;
    emit(&report, json, |r| {
        println!("Worksheet: {}", r.name);
        for entry in &r.cycles {
            println!("Cycle {} ({})", entry.id, entry.name);
            print_cycle(&entry.result);
        }
        for entry in &r.devices {
            println!(
                "Device {} ({}): w = {:.3} kJ/kg, q = {:.3} kJ/kg, T2 = {:.2} K",
                entry.id, entry.name, entry.result.w, entry.result.q, entry.result.outlet.t
            );
        }
        for entry in &r.closed_systems {
            println!(
                "Closed system {} ({}): ΔU = {:.3} kJ, Q = {:.3} kJ, W = {:.3} kJ",
                entry.id, entry.name, entry.result.delta_u, entry.result.q, entry.result.w
            );
        }
        for entry in &r.balances {
            println!(
                "Balance {} ({}): {:?} = {:.4} {}",
                entry.id, entry.name, entry.result.unknown, entry.result.value, entry.result.unit
            );
        }
        for entry in &r.engines {
            println!(
                "Engine {} ({}): η_th = {:.4}, η_Carnot = {:.4}, {}",
                entry.id,
                entry.name,
                entry.result.thermal_efficiency,
                entry.result.carnot_efficiency,
                if entry.result.impossible { "impossible" } else { "possible" }
            );
        }
        for entry in &r.mixtures {
            println!(
                "Mixture {} ({}): {} points, unstable = {}",
                entry.id,
                entry.name,
                entry.result.points.len(),
                entry.result.unstable
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_water_subcommand() {
        let cli = Cli::try_parse_from(["thermolab", "water", "-p", "1 atm", "-t", "150C", "--json"])
            .unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Water { x: None, .. }));
    }

    #[test]
    fn sat_needs_one_key() {
        assert!(Cli::try_parse_from(["thermolab", "sat"]).is_err());
        assert!(Cli::try_parse_from(["thermolab", "sat", "-t", "100C", "-p", "1 bar"]).is_err());
    }

    #[test]
    fn quantity_errors_surface() {
        assert!(matches!(
            quantity("14 psi", Quantity::Pressure),
            Err(CliError::Fluid(_))
        ));
        assert!((quantity("8 MPa", Quantity::Pressure).unwrap() - 8000.0).abs() < 1e-9);
    }
}
