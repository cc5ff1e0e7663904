use crate::cli::{ScoreArgs, ScoreMode};
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::input::{self, AtomRow};
use budeff::core::forcefield::aggregate::ScoreResult;
use budeff::core::forcefield::params::ForceFieldTable;
use budeff::engine::config::ScoringConfig;
use budeff::workflows::score;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    let config = config::build_config(&args)?;
    let table = score::load_forcefield(&config.forcefield_path, config.forcefield_id.as_deref())?;
    info!(
        "Loaded force field '{}' ({} entries, cutoff {:.3} Å).",
        table.name(),
        table.len(),
        config.scoring.effective_cutoff(&table)
    );

    let rows = input::read_atoms(&args.atoms)?;
    let (summary, result) = score_rows(args.mode, &rows, &table, &config.scoring)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| CliError::Other(e.into()))?;
        println!("{}", json);
    } else {
        print!(
            "{}",
            render_report(&config, table.name(), &summary, &result, args.pairs)
        );
    }
    Ok(())
}

fn score_rows(
    mode: ScoreMode,
    rows: &[AtomRow],
    table: &ForceFieldTable,
    scoring: &ScoringConfig,
) -> Result<(String, ScoreResult)> {
    match mode {
        ScoreMode::Intra => {
            let result = score::internal_energy(rows, table, scoring)?;
            Ok((format!("intra ({} atoms)", rows.len()), result))
        }
        ScoreMode::Inter => {
            let names = input::group_names(rows);
            if names.len() < 2 {
                return Err(CliError::Argument(format!(
                    "Inter mode needs at least two groups in the atom list, found {}.",
                    names.len()
                )));
            }
            // Row indices double as atom ids, so reported pairs match the file.
            let result = score::interaction_energy_by_group(
                rows,
                |row: &AtomRow| row.group.clone(),
                table,
                scoring,
            )?;
            Ok((format!("inter (groups {})", names.join(" vs ")), result))
        }
    }
}

fn render_report(
    config: &AppConfig,
    forcefield: &str,
    summary: &str,
    result: &ScoreResult,
    with_pairs: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Force field:  {}", forcefield);
    if let Some(cutoff) = config.scoring.cutoff {
        let _ = writeln!(out, "Cutoff:       {:.3} (override)", cutoff);
    }
    let _ = writeln!(out, "Mode:         {}", summary);
    let _ = writeln!(out, "Steric:       {:.4}", result.steric);
    let _ = writeln!(out, "Desolvation:  {:.4}", result.desolvation);
    let _ = writeln!(out, "Charge:       {:.4}", result.charge);
    let _ = writeln!(out, "Total:        {:.4}", result.total_energy);
    let _ = writeln!(out, "Pairs:        {}", result.pairs.len());

    if with_pairs {
        let _ = writeln!(out);
        let _ = writeln!(out, "a\tb\tdistance\tsteric\tdesolvation\tcharge");
        for pair in &result.pairs {
            let _ = writeln!(
                out,
                "{}\t{}\t{:.4}\t{:.6}\t{:.6}\t{:.6}",
                pair.a.index(),
                pair.b.index(),
                pair.distance,
                pair.energy.steric,
                pair.energy.desolvation,
                pair.energy.charge
            );
        }
    }
    out
}
