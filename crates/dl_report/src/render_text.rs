//! Text renderer: a bordered grid table for the picks and the odds matrix,
//! followed by plain metadata and integrity blocks.

use std::fmt::Write;

use crate::{ReportError, ReportModel};

/// Render the full results file content.
pub fn render_text(model: &ReportModel) -> Result<String, ReportError> {
    let mut out = String::new();

    writeln!(&mut out, "{}", model.title).map_err(|_| ReportError::MissingField("title"))?;
    out.push('\n');

    let pick_headers = [
        "Rank",
        "Team",
        "Manager",
        "Balls",
        "Odds of 1st Overall",
        "Odds of This Pick",
    ];
    let pick_rows: Vec<Vec<String>> = model
        .picks
        .iter()
        .map(|p| {
            vec![
                format!("{} ({})", p.rank, p.glyph),
                p.team.clone(),
                p.manager.clone(),
                p.balls.clone(),
                p.odds_first_pct.clone(),
                p.odds_this_pick_pct.clone(),
            ]
        })
        .collect();
    out.push_str(&grid(&pick_headers, &pick_rows));

    out.push('\n');
    out.push_str("Full odds matrix:\n");
    let mut odds_headers: Vec<&str> = vec!["Team"];
    odds_headers.extend(model.odds_header.iter().map(|h| h.as_str()));
    let odds_rows: Vec<Vec<String>> = model
        .odds_rows
        .iter()
        .map(|r| {
            let mut row = vec![r.team.clone()];
            row.extend(r.cells.iter().cloned());
            row
        })
        .collect();
    out.push_str(&grid(&odds_headers, &odds_rows));

    let m = &model.metadata;
    out.push('\n');
    out.push_str("Additional information:\n");
    let _ = writeln!(&mut out, "League name: {}", m.league_name);
    let _ = writeln!(&mut out, "Number of teams: {}", m.team_count);
    let _ = writeln!(&mut out, "Distribution type: {}", m.distribution);
    let _ = writeln!(&mut out, "Total balls in generation: {}", m.total_balls);
    let _ = writeln!(&mut out, "Time of generation: {}", m.generated_utc);
    let _ = writeln!(&mut out, "Seed: {}", m.seed);

    let i = &model.integrity;
    out.push('\n');
    out.push_str("Integrity:\n");
    let _ = writeln!(&mut out, "Run ID: {}", i.run_id);
    let _ = writeln!(&mut out, "Seed (hex): {}", i.seed_hex);
    let _ = writeln!(&mut out, "Record SHA-256: {}", i.payload_sha256);
    let _ = writeln!(
        &mut out,
        "Engine: {}/{} v{} ({})",
        i.engine_vendor, i.engine_name, i.engine_version, i.engine_build
    );
    out.push('\n');
    out.push_str("Rerunning the engine with this league file and seed reproduces the order above.\n");

    Ok(out)
}

/// Bordered grid with `=` under the header row:
///
/// ```text
/// +------+------+
/// | h1   | h2   |
/// +======+======+
/// | a    | b    |
/// +------+------+
/// ```
fn grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, '-'));
    out.push_str(&line(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>().as_slice(), &widths));
    out.push_str(&border(&widths, '='));
    for row in rows {
        out.push_str(&line(row, &widths));
        out.push_str(&border(&widths, '-'));
    }
    out
}

fn border(widths: &[usize], fill: char) -> String {
    let mut s = String::new();
    for w in widths {
        s.push('+');
        for _ in 0..w + 2 {
            s.push(fill);
        }
    }
    s.push_str("+\n");
    s
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    for (cell, w) in cells.iter().zip(widths) {
        let pad = w - cell.chars().count();
        s.push_str("| ");
        s.push_str(cell);
        for _ in 0..pad + 1 {
            s.push(' ');
        }
    }
    s.push_str("|\n");
    s
}
