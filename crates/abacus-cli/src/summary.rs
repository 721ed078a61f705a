//! Terminal rendering for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use abacus_model::Operation;
use abacus_progress::{LevelView, ProgressSummary, SectionProgress};

use crate::commands::{NextLevel, RecordReport, SelectOutcome};

pub fn print_levels(views: &[LevelView]) {
    println!("{}", levels_table(views));
}

pub fn levels_table(views: &[LevelView]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Level"),
        header_cell("Title"),
        header_cell("Answered"),
        header_cell("Correct"),
        header_cell("Accuracy"),
        header_cell("State"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for view in views {
        let marker = if view.current {
            Cell::new("▶").fg(Color::Cyan)
        } else {
            Cell::new("")
        };
        let id_cell = if view.unlocked {
            Cell::new(&view.id)
        } else {
            dim_cell(&view.id)
        };
        table.add_row(vec![
            marker,
            id_cell,
            Cell::new(&view.title),
            count_cell(view.questions_completed),
            count_cell(view.correct_answers),
            dim_or(view.accuracy.map(format_percent)),
            state_cell(view),
        ]);
    }
    table
}

pub fn print_progress_summary(summary: &ProgressSummary<'_>) {
    println!("{}", summary_table(summary));
    let overall = summary.overall_progress();
    println!(
        "Overall: {}/{} levels mastered ({:.1}%)",
        overall.completed,
        overall.total,
        summary.overall_percentage()
    );
}

pub fn summary_table(summary: &ProgressSummary<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Operation"),
        header_cell("Section"),
        header_cell("Mastered"),
        header_cell("Progress"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for operation in Operation::ALL {
        for (complement, section) in summary.sections(operation) {
            table.add_row(vec![
                Cell::new(operation.label()),
                Cell::new(complement.label()),
                fraction_cell(section),
                Cell::new(progress_bar(section)),
            ]);
        }
        let total = summary.operation_progress(operation);
        table.add_row(vec![
            Cell::new(operation.label())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("All sections")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            fraction_cell(total).add_attribute(Attribute::Bold),
            Cell::new(progress_bar(total)),
        ]);
    }
    table
}

pub fn print_record_report(report: &RecordReport) {
    println!("{}", format_record_report(report));
}

pub fn format_record_report(report: &RecordReport) -> String {
    let noun = if report.recorded == 1 {
        "answer"
    } else {
        "answers"
    };
    let mut lines = vec![
        format!(
            "Recorded {} {noun} for {} ({})",
            report.recorded, report.title, report.level
        ),
        format!(
            "Score: {}/{} correct ({})",
            report.stats.correct_answers(),
            report.stats.questions_completed(),
            report
                .stats
                .accuracy()
                .map_or_else(|| "-".to_string(), format_percent)
        ),
    ];
    if report.newly_completed {
        lines.push("Level mastered!".to_string());
    } else if report.completed {
        lines.push("Level already mastered.".to_string());
    } else {
        match report.answers_remaining {
            Some(1) => lines.push("1 more correct answer to master this level.".to_string()),
            Some(n) => lines.push(format!("{n} more correct answers to master this level.")),
            None => lines.push("This level can no longer reach the mastery ratio.".to_string()),
        }
    }
    lines.extend(report.newly_unlocked.iter().map(|id| format!("Unlocked: {id}")));
    lines.join("\n")
}

pub fn format_select_outcome(outcome: &SelectOutcome) -> String {
    match outcome {
        SelectOutcome::Selected { level, title } => {
            format!("Now practising {title} ({level})")
        }
        SelectOutcome::Locked {
            level,
            title,
            prerequisite,
        } => match prerequisite {
            Some(prerequisite) => format!(
                "{title} ({level}) is locked. Master {prerequisite} first."
            ),
            None => format!("{title} ({level}) is locked."),
        },
    }
}

pub fn format_next(next: &[NextLevel]) -> String {
    next.iter()
        .map(|entry| match &entry.level {
            Some(view) => format!(
                "{}: {} ({}), {}/{} correct",
                entry.operation.label(),
                view.id,
                view.title,
                view.correct_answers,
                view.questions_completed
            ),
            None => format!("{}: every level mastered", entry.operation.label()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Ten-cell bar, e.g. `████░░░░░░`.
fn progress_bar(section: SectionProgress) -> String {
    let filled = if section.total == 0 {
        0
    } else {
        (section.completed * 10 + section.total / 2) / section.total
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled.min(10)))
}

fn state_cell(view: &LevelView) -> Cell {
    if view.completed {
        Cell::new("mastered")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else if view.unlocked {
        Cell::new("open").fg(Color::Yellow)
    } else {
        dim_cell("locked")
    }
}

fn fraction_cell(section: SectionProgress) -> Cell {
    let cell = Cell::new(format!("{}/{}", section.completed, section.total));
    if section.is_complete() {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

fn count_cell(count: u32) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_or(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
