//! Evaluate every entry of a worksheet.

use crate::ProjectResult;
use crate::schema::Worksheet;
use serde::Serialize;
use tl_fluids::{MixtureCurve, mixture_curve};
use tl_process::{
    BalanceSolution, ClosedResult, CycleResult, EngineAudit, FlowResult, audit_engine,
    closed_process, run_cycle, solve_balance, solve_device,
};
use tracing::info;

/// Result of one worksheet entry, keyed by its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<T> {
    pub id: String,
    pub name: String,
    pub result: T,
}

impl<T> Entry<T> {
    fn new(id: &str, name: &str, result: T) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetReport {
    pub name: String,
    pub cycles: Vec<Entry<CycleResult>>,
    pub devices: Vec<Entry<FlowResult>>,
    pub closed_systems: Vec<Entry<ClosedResult>>,
    pub balances: Vec<Entry<BalanceSolution>>,
    pub engines: Vec<Entry<EngineAudit>>,
    pub mixtures: Vec<Entry<MixtureCurve>>,
}

/// Run every calculation in the worksheet. Stops at the first failing entry.
pub fn evaluate(worksheet: &Worksheet) -> ProjectResult<WorksheetReport> {
    let cycles = worksheet
        .cycles
        .iter()
        .map(|c| Ok(Entry::new(&c.id, &c.name, run_cycle(&c.cycle)?)))
        .collect::<ProjectResult<Vec<_>>>()?;

    let devices = worksheet
        .devices
        .iter()
        .map(|d| Ok(Entry::new(&d.id, &d.name, solve_device(&d.spec)?)))
        .collect::<ProjectResult<Vec<_>>>()?;

    let closed_systems = worksheet
        .closed_systems
        .iter()
        .map(|c| Ok(Entry::new(&c.id, &c.name, closed_process(&c.system)?)))
        .collect::<ProjectResult<Vec<_>>>()?;

    let balances = worksheet
        .balances
        .iter()
        .map(|b| Ok(Entry::new(&b.id, &b.name, solve_balance(&b.inputs)?)))
        .collect::<ProjectResult<Vec<_>>>()?;

    let engines = worksheet
        .engines
        .iter()
        .map(|e| Entry::new(&e.id, &e.name, audit_engine(&e.engine)))
        .collect();

    let mixtures = worksheet
        .mixtures
        .iter()
        .map(|m| {
            let curve = mixture_curve(
                &m.component_a.data().antoine,
                &m.component_b.data().antoine,
                m.temperature_c,
                m.margules(),
                m.model,
                m.step,
            );
            Entry::new(&m.id, &m.name, curve)
        })
        .collect();

    info!(
        worksheet = %worksheet.name,
        cycles = worksheet.cycles.len(),
        devices = worksheet.devices.len(),
        "worksheet evaluated"
    );

    Ok(WorksheetReport {
        name: worksheet.name.clone(),
        cycles,
        devices,
        closed_systems,
        balances,
        engines,
        mixtures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CycleDef, MixtureDef};
    use tl_fluids::{ActivityModel, Component};
    use tl_process::CycleDefinition;

    #[test]
    fn evaluates_each_section() {
        let mut ws = Worksheet::new("report");
        ws.cycles.push(CycleDef {
            id: "rankine".to_string(),
            name: "Rankine".to_string(),
            cycle: CycleDefinition::rankine(),
        });
        ws.mixtures.push(MixtureDef {
            id: "etoh".to_string(),
            name: "Ethanol/Water".to_string(),
            component_a: Component::Ethanol,
            component_b: Component::Water,
            temperature_c: 78.0,
            margules: None,
            model: ActivityModel::Regular,
            step: 0.05,
        });

        let report = evaluate(&ws).unwrap();
        assert_eq!(report.cycles.len(), 1);
        assert!(report.cycles[0].result.thermal_efficiency > 0.0);
        assert_eq!(report.mixtures[0].result.points.len(), 21);
        assert!(!report.mixtures[0].result.unstable);
    }

    #[test]
    fn failing_entry_is_reported() {
        let mut ws = Worksheet::new("bad");
        let mut cycle = CycleDefinition::rankine();
        cycle.stages[0].efficiency = 0.0;
        ws.cycles.push(CycleDef {
            id: "bad".to_string(),
            name: "Bad".to_string(),
            cycle,
        });
        assert!(matches!(evaluate(&ws), Err(crate::ProjectError::Process(_))));
    }
}
