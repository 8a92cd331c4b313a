//! Output formatting for the CLI.

use crate::commands::check::CheckReport;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wedlock_domain::{ChatColor, Couple, PlayerId};
use wedlock_host::{Audience, Notice};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the couple listing.
    pub fn format_couples(&self, couples: &[(Couple, Option<ChatColor>)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_couples_json(couples),
            OutputFormat::Table => Ok(self.format_couples_table(couples)),
            OutputFormat::Quiet => Ok(couples
                .iter()
                .map(|(couple, _)| couple.canonical_id().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_couples_json(&self, couples: &[(Couple, Option<ChatColor>)]) -> Result<String> {
        let json: Vec<serde_json::Value> = couples
            .iter()
            .map(|(couple, color)| {
                let (first, second) = couple.members();
                serde_json::json!({
                    "first": first.to_string(),
                    "second": second.to_string(),
                    "color": color.map(|c| c.as_str()),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_couples_table(&self, couples: &[(Couple, Option<ChatColor>)]) -> String {
        if couples.is_empty() {
            return self.colorize("No couples found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Partner", "Partner", "Color"]);

        for (couple, color) in couples {
            let (first, second) = couple.members();
            let color = match color {
                Some(color) => self.swatch(*color),
                None => "-".to_string(),
            };
            builder.push_record([first.to_string(), second.to_string(), color]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format one player's marital status.
    pub fn format_player(
        &self,
        player: PlayerId,
        partner: Option<PlayerId>,
        color: Option<ChatColor>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "player": player.to_string(),
                "partner": partner.map(|p| p.to_string()),
                "color": color.map(|c| c.as_str()),
            }))?),
            OutputFormat::Quiet => Ok(partner.map(|p| p.to_string()).unwrap_or_default()),
            OutputFormat::Table => Ok(match partner {
                Some(partner) => {
                    let color = color
                        .map(|c| format!(" ({})", self.swatch(c)))
                        .unwrap_or_default();
                    format!("{} is married to {}{}", player, partner, color)
                }
                None => self.info(&format!("{} is not married", player)),
            }),
        }
    }

    /// Format the result of a file check.
    pub fn format_check(&self, report: &CheckReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.problem_count().to_string()),
            OutputFormat::Table => {
                let mut lines = vec![format!(
                    "{}: {} couple(s), {} colored",
                    report.path, report.couples, report.colored
                )];
                for problem in report.problems() {
                    lines.push(self.warning(problem));
                }
                if report.problem_count() == 0 {
                    lines.push(self.success("No problems found"));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a notice the way a chat client would show it.
    pub fn notice(&self, notice: &Notice, audience: &str) -> String {
        let mut line = format!("[{}] {}", audience, notice.render());
        if !matches!(notice.audience, Audience::Everyone) {
            let key = self.colorize(notice.key.translation_key(), "cyan");
            line = format!("{}  {}", line, key);
        }
        for action in &notice.actions {
            let label = self.chat(action.label.english(), action.color);
            line.push_str(&format!("\n    {} -> {}", label, action.command));
        }
        line
    }

    /// Render `text` in a chat color.
    pub fn chat(&self, text: &str, color: ChatColor) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        let rgb = color.rgb();
        text.truecolor((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
            .to_string()
    }

    fn swatch(&self, color: ChatColor) -> String {
        self.chat(color.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
