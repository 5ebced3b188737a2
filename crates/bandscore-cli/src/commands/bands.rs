//! The `bandscore bands` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use bandscore_core::band::band_table;
use bandscore_core::model::Skill;

pub fn execute(skill: Option<Skill>) -> Result<()> {
    let skills = match skill {
        Some(skill) => vec![skill],
        None => vec![Skill::Listening, Skill::Reading],
    };

    for skill in skills {
        let mut table = Table::new();
        table.set_header(vec!["Raw score", "Band"]);

        for (low, high, band) in band_table(skill).ranges() {
            let raw = if low == high {
                low.to_string()
            } else {
                format!("{low}-{high}")
            };
            table.add_row(vec![Cell::new(raw), Cell::new(band)]);
        }

        println!("{skill}\n{table}\n");
    }

    Ok(())
}
