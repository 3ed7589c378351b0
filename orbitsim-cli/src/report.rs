//! Text reports and history export.

use anyhow::{Context, Result};
use orbitsim_core::constants::{AU, SECONDS_PER_DAY};
use orbitsim_core::diagnostics::orbital_energy;
use orbitsim_core::{Simulation, Snapshot};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct HistoryExport<'a> {
    scenario: &'a str,
    bodies: Vec<&'a str>,
    snapshots: &'a [Snapshot],
}

/// Position, distance and speed of every body except the heaviest one,
/// followed by the system-wide energies
pub fn write_status<W: Write>(out: &mut W, name: &str, sim: &Simulation) -> Result<()> {
    let latest = sim.latest();
    let bodies = sim.bodies();
    let central = bodies
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.mass().total_cmp(&b.mass()))
        .map(|(i, _)| i);

    writeln!(
        out,
        "Scenario '{}' at {:.1} days ({} steps)",
        name,
        sim.time() / SECONDS_PER_DAY,
        sim.step_count()
    )?;
    writeln!(out, "{}", "-".repeat(40))?;

    for (i, body) in bodies.iter().enumerate() {
        if bodies.len() > 1 && Some(i) == central {
            continue;
        }
        let pos_au = body.position() / AU;
        writeln!(out, "{}:", body.name())?;
        writeln!(out, "  Distance: {:.3} AU", pos_au.length())?;
        writeln!(out, "  Speed: {:.1} km/s", body.speed() / 1000.0)?;
        writeln!(
            out,
            "  Position: [{:.3}, {:.3}, {:.3}] AU",
            pos_au.x, pos_au.y, pos_au.z
        )?;
        if let Some(energy) = orbital_energy(bodies, i) {
            writeln!(out, "  Orbital energy: {:.6e} J", energy)?;
        }
    }

    let d = &latest.diagnostics;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "Kinetic energy:   {:.6e} J", d.kinetic)?;
    writeln!(out, "Potential energy: {:.6e} J", d.potential)?;
    writeln!(out, "Total energy:     {:.6e} J", d.total)?;
    writeln!(
        out,
        "Angular momentum: {:.6e} kg m^2/s",
        d.angular_momentum_magnitude()
    )?;
    writeln!(out, "Energy drift:     {:.3e}", sim.energy_drift())?;
    Ok(())
}

/// One row per body per snapshot: body,time,x,y,z,vx,vy,vz
pub fn write_csv<W: Write>(out: &mut W, sim: &Simulation) -> Result<()> {
    writeln!(out, "body,time,x,y,z,vx,vy,vz")?;
    for body_index in 0..sim.body_count() {
        let name = sim.bodies()[body_index].name();
        for snapshot in sim.history() {
            let s = &snapshot.bodies[body_index];
            writeln!(
                out,
                "{},{},{},{},{},{},{},{}",
                name,
                snapshot.time,
                s.position.x,
                s.position.y,
                s.position.z,
                s.velocity.x,
                s.velocity.y,
                s.velocity.z
            )?;
        }
    }
    Ok(())
}

/// Energy and angular momentum series, one row per snapshot
pub fn write_energy_csv<W: Write>(out: &mut W, sim: &Simulation) -> Result<()> {
    writeln!(out, "step,time,kinetic,potential,total,lx,ly,lz")?;
    for snapshot in sim.history() {
        let d = &snapshot.diagnostics;
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            snapshot.step,
            snapshot.time,
            d.kinetic,
            d.potential,
            d.total,
            d.angular_momentum.x,
            d.angular_momentum.y,
            d.angular_momentum.z
        )?;
    }
    Ok(())
}

pub fn write_yaml<W: Write>(out: &mut W, name: &str, sim: &Simulation) -> Result<()> {
    let export = HistoryExport {
        scenario: name,
        bodies: sim.bodies().iter().map(|b| b.name()).collect(),
        snapshots: sim.history(),
    };
    serde_yaml::to_writer(out, &export)?;
    Ok(())
}

/// Write the history to `path`, as CSV when the extension says so and YAML otherwise
pub fn export_history(path: &Path, name: &str, sim: &Simulation) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(&mut out, sim)?,
        _ => write_yaml(&mut out, name, sim)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Preset;

    fn short_run() -> Simulation {
        let mut sim = Preset::SunEarth.scenario().build_simulation().unwrap();
        sim.run(3.0 * 3600.0, 3600.0).unwrap();
        sim
    }

    #[test]
    fn status_skips_the_central_body() {
        let sim = short_run();
        let mut out = Vec::new();
        write_status(&mut out, "sun-earth", &sim).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Earth:"));
        assert!(!text.contains("Sun:"));
        assert!(text.contains("Distance: 1.000 AU"));
        assert!(text.contains("Speed: 29.8 km/s"));
        assert!(text.contains("Energy drift:"));
    }

    #[test]
    fn csv_has_one_row_per_body_and_snapshot() {
        let sim = short_run();
        let mut out = Vec::new();
        write_csv(&mut out, &sim).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "body,time,x,y,z,vx,vy,vz");
        assert_eq!(lines.len(), 1 + 2 * 4);
        assert!(lines[1].starts_with("Sun,0,"));
        assert!(lines[5].starts_with("Earth,0,149600000000,"));
    }

    #[test]
    fn energy_csv_lists_every_snapshot() {
        let sim = short_run();
        let mut out = Vec::new();
        write_energy_csv(&mut out, &sim).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 1 + 4);
        assert!(text.lines().nth(4).unwrap().starts_with("3,10800,"));
    }

    #[test]
    fn yaml_export_contains_names_and_snapshots() {
        let sim = short_run();
        let mut out = Vec::new();
        write_yaml(&mut out, "sun-earth", &sim).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();

        assert_eq!(value["scenario"].as_str(), Some("sun-earth"));
        assert_eq!(value["bodies"][1].as_str(), Some("Earth"));
        assert_eq!(value["snapshots"].as_sequence().map(|s| s.len()), Some(4));
        assert_eq!(value["snapshots"][3]["step"].as_u64(), Some(3));
    }
}
