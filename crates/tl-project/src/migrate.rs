//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Worksheet;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut worksheet: Worksheet) -> Result<Worksheet, ProjectError> {
    while worksheet.version < LATEST_VERSION {
        worksheet = migrate_one_version(worksheet)?;
    }
    Ok(worksheet)
}

fn migrate_one_version(worksheet: Worksheet) -> Result<Worksheet, ProjectError> {
    match worksheet.version {
        0 => migrate_v0_to_v1(worksheet),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 worksheets did not carry cycle stage ids; number them in order.
fn migrate_v0_to_v1(mut worksheet: Worksheet) -> Result<Worksheet, ProjectError> {
    for cycle in &mut worksheet.cycles {
        for (idx, stage) in cycle.cycle.stages.iter_mut().enumerate() {
            if stage.id.is_empty() {
                stage.id = (idx + 1).to_string();
            }
        }
    }
    worksheet.version = 1;
    Ok(worksheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CycleDef;
    use tl_process::CycleDefinition;

    #[test]
    fn v0_stages_get_ids() {
        let mut cycle = CycleDefinition::rankine();
        for stage in &mut cycle.stages {
            stage.id.clear();
        }
        let mut ws = Worksheet::new("old");
        ws.version = 0;
        ws.cycles.push(CycleDef {
            id: "rankine".to_string(),
            name: "Rankine".to_string(),
            cycle,
        });

        let migrated = migrate_to_latest(ws).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        let ids: Vec<&str> = migrated.cycles[0]
            .cycle
            .stages
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn latest_is_untouched() {
        let ws = Worksheet::new("current");
        assert_eq!(migrate_to_latest(ws.clone()).unwrap(), ws);
    }
}
