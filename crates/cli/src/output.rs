//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use console::{measure_text_width, pad_str, Alignment};
use nearby_core::Error;
use nearby_places::{format_distance, Place};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(measure_text_width(message)));
    }

    /// Print an error with its context and suggestion
    pub fn report(error: &Error) {
        Self::error(&format!("{} {}", error.code.to_string().dimmed(), error.message));
        if let Some(context) = &error.context {
            eprintln!("  {} {}", "context:".dimmed(), context);
        }
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Format a position as `lat, lon` with five decimals (about a meter)
pub fn format_coordinate(latitude: f64, longitude: f64) -> String {
    format!("{:.5}, {:.5}", latitude, longitude)
}

const PLACE_HEADERS: [&str; 4] = ["Name", "Type", "Distance", "Position"];

/// Render places as an aligned table, one row per place in the given order.
pub fn render_places(places: &[Place]) -> String {
    let rows: Vec<[String; 4]> = places
        .iter()
        .map(|p| {
            [
                p.name.clone(),
                p.category.to_string(),
                format_distance(p.distance),
                format_coordinate(p.latitude, p.longitude),
            ]
        })
        .collect();

    let mut widths = PLACE_HEADERS.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &PLACE_HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            // Distance reads best right-aligned
            let align = if i == 2 { Alignment::Right } else { Alignment::Left };
            pad_str(cell, *width, align, None).into_owned()
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Print the place table to stdout
pub fn print_places(places: &[Place]) {
    print!("{}", render_places(places));
}
