use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use spdx_checkr::models::{ExpandReport, ExtractReport, SatisfiesReport, ValidationReport, Verdict};
use spdx_checkr::{Catalog, IdKind, Node};

/// Render the validation result for each requested id.
pub fn render_validation(catalog: &Catalog, ids: &[String], report: &ValidationReport, quiet: bool) {
    let invalid = report.invalid.len();

    if quiet {
        println!(
            "Total: {}  Valid: {}  Invalid: {}",
            ids.len(),
            (ids.len() - invalid).to_string().green(),
            invalid.to_string().red(),
        );
        return;
    }

    print_header();

    let mut table = new_table(&["Identifier", "Catalog", "Verdict"]);
    for id in ids {
        let kind = catalog
            .lookup(id)
            .map(|(_, kind)| kind)
            .or_else(|| catalog.lookup_deprecated(id).map(|_| IdKind::Deprecated));

        let (kind_str, kind_color) = match kind {
            Some(IdKind::Active) => ("active", Color::Green),
            Some(IdKind::Deprecated) => ("deprecated", Color::Yellow),
            Some(IdKind::Exception) => ("exception", Color::Cyan),
            None => ("unknown", Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(id),
            Cell::new(kind_str).fg(kind_color),
            verdict_cell(Verdict::from(kind.is_some())),
        ]);
    }
    println!("{}", table);

    if report.all_valid {
        println!("\n {} All identifiers are valid", "✓".green());
    } else {
        println!(
            "\n {} {} unknown identifier(s): {}",
            "✗".red(),
            invalid,
            report.invalid.join(", ")
        );
    }
}

/// Render the distinct licenses of an expression.
pub fn render_extract(report: &ExtractReport, quiet: bool) {
    if quiet {
        println!("{}", report.licenses.join(" "));
        return;
    }

    print_header();
    println!(" Expression: {}\n", report.expression);

    let mut table = new_table(&["#", "License"]);
    for (i, license) in report.licenses.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(license),
        ]);
    }
    println!("{}", table);
}

/// Render a satisfaction verdict.
pub fn render_satisfies(report: &SatisfiesReport, quiet: bool) {
    let line = if report.satisfied {
        format!("{} satisfied", "✓".green())
    } else {
        format!("{} not satisfied", "✗".red())
    };

    if quiet {
        println!("{}", line);
        return;
    }

    print_header();
    println!(" Expression : {}", report.expression);
    println!(" Target     : {}\n", report.target);
    println!(" {}", line.bold());
}

/// Render the DNF clauses of an expression, one row per clause.
pub fn render_expand(report: &ExpandReport, quiet: bool) {
    let clauses: Vec<String> = report.clauses.iter().map(|c| c.join(" AND ")).collect();

    if quiet {
        println!("{}", clauses.join(" OR "));
        return;
    }

    print_header();
    println!(" Expression: {}\n", report.expression);

    let mut table = new_table(&["Clause", "Licenses (all required)"]);
    for (i, clause) in clauses.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(clause),
        ]);
    }
    println!("{}", table);
}

/// Render the bracketed form of a parsed tree.
pub fn render_tree(expression: &str, node: &Node, quiet: bool) {
    if quiet {
        println!("{}", node);
        return;
    }

    print_header();
    println!(" Expression: {}", expression);
    println!(" Parsed    : {}", node.to_string().bold());
}

fn print_header() {
    println!("\n {} v{}\n", "spdx-checkr".bold(), env!("CARGO_PKG_VERSION"));
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn verdict_cell(verdict: Verdict) -> Cell {
    let (text, color) = match verdict {
        Verdict::Pass => ("✓ pass", Color::Green),
        Verdict::Fail => ("✗ fail", Color::Red),
    };
    Cell::new(text).fg(color).set_alignment(CellAlignment::Center)
}
