//! Worksheet validation logic.

use crate::schema::{CycleDef, DeviceDef, MixtureDef, Worksheet};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Empty ID in {context}")]
    EmptyId { context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_worksheet(worksheet: &Worksheet) -> Result<(), ValidationError> {
    if worksheet.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: worksheet.version,
        });
    }

    let mut ids = HashSet::new();
    for (id, context) in worksheet.entry_ids() {
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId {
                context: context.to_string(),
            });
        }
        if !ids.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: context.to_string(),
            });
        }
    }

    for cycle in &worksheet.cycles {
        validate_cycle(cycle)?;
    }
    for device in &worksheet.devices {
        validate_device(device)?;
    }
    for system in &worksheet.closed_systems {
        let field = |name: &str| format!("closed_systems.{}.{name}", system.id);
        positive(&field("mass_kg"), system.system.mass_kg)?;
        positive(&field("p1_kpa"), system.system.p1_kpa)?;
        positive(&field("t1_k"), system.system.t1_k)?;
        positive(&field("p2_kpa"), system.system.p2_kpa)?;
    }
    for balance in &worksheet.balances {
        let field = |name: &str| format!("balances.{}.{name}", balance.id);
        let inputs = &balance.inputs;
        for (name, value) in [
            ("t1_k", inputs.t1_k),
            ("t2_k", inputs.t2_k),
            ("mass_kg", inputs.mass_kg),
            ("q_kj", inputs.q_kj),
            ("w_kj", inputs.w_kj),
        ] {
            finite(&field(name), value)?;
        }
    }
    for engine in &worksheet.engines {
        let field = |name: &str| format!("engines.{}.{name}", engine.id);
        positive(&field("th_k"), engine.engine.th_k)?;
        positive(&field("tl_k"), engine.engine.tl_k)?;
        positive(&field("t0_k"), engine.engine.t0_k)?;
    }
    for mixture in &worksheet.mixtures {
        validate_mixture(mixture)?;
    }

    Ok(())
}

fn validate_cycle(cycle: &CycleDef) -> Result<(), ValidationError> {
    let def = &cycle.cycle;
    positive(&format!("cycles.{}.initial_p_kpa", cycle.id), def.initial_p_kpa)?;
    positive(&format!("cycles.{}.initial_t_k", cycle.id), def.initial_t_k)?;
    if def.stages.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("cycles.{}.stages", cycle.id),
            value: "[]".to_string(),
            reason: "cycle needs at least one stage".to_string(),
        });
    }

    let mut stage_ids = HashSet::new();
    for stage in &def.stages {
        if !stage_ids.insert(stage.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: stage.id.clone(),
                context: format!("cycles.{}.stages", cycle.id),
            });
        }
        let field = |name: &str| format!("cycles.{}.stages.{}.{name}", cycle.id, stage.id);
        positive(&field("target_p_kpa"), stage.target_p_kpa)?;
        if stage.kind.is_work() {
            efficiency(&field("efficiency"), stage.efficiency)?;
        } else {
            positive(&field("target_t_k"), stage.target_t_k)?;
        }
    }
    Ok(())
}

fn validate_device(device: &DeviceDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("devices.{}.{name}", device.id);
    let spec = &device.spec;
    positive(&field("p1_kpa"), spec.p1_kpa)?;
    positive(&field("t1_k"), spec.t1_k)?;
    positive(&field("p2_kpa"), spec.p2_kpa)?;
    efficiency(&field("efficiency"), spec.efficiency)
}

fn validate_mixture(mixture: &MixtureDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("mixtures.{}.{name}", mixture.id);
    finite(&field("temperature_c"), mixture.temperature_c)?;
    if let Some(a) = mixture.margules {
        finite(&field("margules"), a)?;
    }
    if !(mixture.step > 0.0 && mixture.step <= 1.0) {
        return Err(ValidationError::InvalidValue {
            field: field("step"),
            value: mixture.step.to_string(),
            reason: "step must be in (0, 1]".to_string(),
        });
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive".to_string(),
        })
    }
}

fn efficiency(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "efficiency must be in (0, 1]".to_string(),
        })
    }
}
