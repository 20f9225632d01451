//! TUI rendering traits for sundial types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to sundial-core types using owo_colors.

use owo_colors::OwoColorize;
use sundial_core::config::ClockFormat;
use sundial_core::local_time::MINUTES_PER_DAY;
use sundial_core::{City, DayPhase, LocalTime, OverlapSegment, Timeline, TimelineRow};

/// One terminal cell per 30 minutes.
const BAR_CELLS: usize = 48;
const MINUTES_PER_CELL: u32 = MINUTES_PER_DAY / BAR_CELLS as u32;

/// Width of the city name column in timeline rows
const LABEL_WIDTH: usize = 16;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DayPhase {
    fn render(&self) -> String {
        let label = self.label();
        match self {
            DayPhase::Dawn => label.yellow().to_string(),
            DayPhase::Day => label.bright_yellow().to_string(),
            DayPhase::Dusk => label.magenta().to_string(),
            DayPhase::Night => label.blue().to_string(),
        }
    }
}

impl Render for OverlapSegment {
    fn render(&self) -> String {
        format!("{}–{}", hour_label(self.start), hour_label(self.end))
    }
}

/// "14.5" as "14:30"
fn hour_label(hour: f64) -> String {
    let minutes = (hour * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Wall clock as "03:45 PM" or "15:45".
pub fn clock(local: &LocalTime, format: ClockFormat) -> String {
    match format {
        ClockFormat::TwentyFourHour => format!("{:02}:{:02}", local.hour, local.minute),
        ClockFormat::TwelveHour => {
            let suffix = if local.hour < 12 { "AM" } else { "PM" };
            let hour = match local.hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{:02}:{:02} {}", hour, local.minute, suffix)
        }
    }
}

/// Date as "Mon, Jun 3".
pub fn date(local: &LocalTime) -> String {
    match local.to_naive() {
        Ok(naive) => naive.format("%a, %b %-d").to_string(),
        Err(_) => local.to_string(),
    }
}

/// One clock line: marker, city, time, date and part of the day.
pub fn render_clock(city: &City, local: &LocalTime, format: ClockFormat, is_home: bool) -> String {
    let marker = if is_home { "⌂".cyan().to_string() } else { " ".to_string() };
    let icon = if local.is_daytime() { "☀" } else { "☾" };

    format!(
        "{} {:<20} {}  {}  {} {}",
        marker,
        city.name.bold(),
        clock(local, format).bold(),
        date(local).dimmed(),
        icon,
        local.phase().render()
    )
}

/// Hour ruler matching the bars, labelled every 3 hours.
fn render_ruler() -> String {
    let labels: String = (0..24)
        .step_by(3)
        .map(|h| format!("{:<6}", format!("{:02}", h)))
        .collect();
    format!("{:LABEL_WIDTH$} {}", "", labels.dimmed())
}

impl Render for TimelineRow {
    fn render(&self) -> String {
        let marker_cell = ((self.marker * BAR_CELLS as f64) as usize).min(BAR_CELLS - 1);

        let bar: String = (0..BAR_CELLS)
            .map(|cell| {
                let minute = cell as u32 * MINUTES_PER_CELL;
                if cell == marker_cell {
                    "|".bold().to_string()
                } else if self.window.contains(minute) {
                    "█".blue().to_string()
                } else {
                    "·".dimmed().to_string()
                }
            })
            .collect();

        let label: String = self.city.name.chars().take(LABEL_WIDTH).collect();
        format!(
            "{:<LABEL_WIDTH$} {} {:02}:{:02}",
            label, bar, self.local.hour, self.local.minute
        )
    }
}

impl Render for Timeline {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Timeline on".dimmed(), self.reference.name.bold()),
            render_ruler(),
        ];

        lines.extend(self.rows.iter().map(Render::render));

        if self.rows.len() >= 2 {
            lines.push(String::new());
            lines.push(render_overlap_bar(&self.overlap));

            let total = self.total_overlap_hours();
            if total > 0.0 {
                let ranges: Vec<String> = self.overlap.iter().map(Render::render).collect();
                lines.push(format!(
                    "{:LABEL_WIDTH$} {} ({})",
                    "",
                    format!("{}h overlap", total).green(),
                    ranges.join(", ")
                ));
            } else {
                lines.push(format!("{:LABEL_WIDTH$} {}", "", "No common work hours found".red()));
            }
        }

        lines.join("\n")
    }
}

fn render_overlap_bar(segments: &[OverlapSegment]) -> String {
    let bar: String = (0..BAR_CELLS)
        .map(|cell| {
            let hour = f64::from(cell as u32 * MINUTES_PER_CELL) / 60.0;
            if segments.iter().any(|s| hour >= s.start && hour < s.end) {
                "▓".green().to_string()
            } else {
                " ".to_string()
            }
        })
        .collect();

    format!("{:<LABEL_WIDTH$} {}", "✓ Overlap", bar)
}
