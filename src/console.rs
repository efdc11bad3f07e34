//! Line-oriented command console
//!
//! One command per line, one JSON reply per line. Text that does not start
//! with `/` is logged as food.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;
use crate::db::{FoodEntryStore, UserStore};
use crate::error::DiaryResult;
use crate::models::{EntryId, PreferencesUpdate, UnitSystem, UserCreate};
use crate::tools::{diary, users};

/// Commands and their one-line descriptions, in `/help` order
pub const COMMANDS: [(&str, &str); 11] = [
    ("/start", "register and show your profile"),
    ("/log <text>", "log food, e.g. \"/log lunch chicken soup\""),
    ("/view", "today's entries"),
    ("/stats [days]", "statistics for the last days"),
    ("/history", "all-time statistics and the last few days"),
    ("/goal <kcal>", "set the daily calorie goal"),
    ("/progress", "today's calories against the goal"),
    ("/units <metric|imperial>", "choose measurement units"),
    ("/delete <entry id>", "remove an entry"),
    ("/help", "this list"),
    ("<text>", "anything else is logged as food"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Log(String),
    View,
    Stats(Option<u32>),
    History,
    Goal(f64),
    Progress,
    Units(UnitSystem),
    Delete(EntryId),
    Help,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try /help)")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid argument for {command}: {value}")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

impl Command {
    /// Parse one input line; blank lines yield `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if !line.starts_with('/') {
            return Ok(Some(Command::Log(line.to_string())));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name {
            "/start" => Command::Start,
            "/log" => Command::Log(required("/log", arg)?.to_string()),
            "/view" => Command::View,
            "/stats" if arg.is_empty() => Command::Stats(None),
            "/stats" => Command::Stats(Some(parse_arg("/stats", arg)?)),
            "/history" => Command::History,
            "/goal" => Command::Goal(parse_arg("/goal", required("/goal", arg)?)?),
            "/progress" => Command::Progress,
            "/units" => {
                let value = required("/units", arg)?;
                let units = UnitSystem::from_name(value).ok_or_else(|| {
                    CommandError::InvalidArgument {
                        command: "/units",
                        value: value.to_string(),
                    }
                })?;
                Command::Units(units)
            }
            "/delete" => Command::Delete(EntryId(parse_arg("/delete", required("/delete", arg)?)?)),
            "/help" => Command::Help,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(command: &'static str, arg: &'a str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(arg)
}

fn parse_arg<T: std::str::FromStr>(command: &'static str, arg: &str) -> Result<T, CommandError> {
    arg.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: arg.to_string(),
    })
}

/// Executes commands for the configured user against a store
pub struct Console<S, Tz: TimeZone> {
    store: S,
    config: Config,
    tz: Tz,
}

impl<S, Tz> Console<S, Tz>
where
    S: UserStore + FoodEntryStore,
    Tz: TimeZone,
{
    pub fn new(store: S, config: Config, tz: Tz) -> Self {
        Self { store, config, tz }
    }

    /// Parse and run one line; `None` for blank input
    ///
    /// Failures are reported as `{"error": ...}` replies.
    pub fn handle_line(&self, line: &str, now: DateTime<Utc>) -> Option<Value> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(e) => return Some(json!({ "error": e.to_string() })),
        };

        match self.execute(&command, now) {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::warn!(?command, error = %e, "command failed");
                Some(json!({ "error": e.to_string() }))
            }
        }
    }

    pub fn execute(&self, command: &Command, now: DateTime<Utc>) -> DiaryResult<Value> {
        let user_id = self.config.user_id;
        let today = diary::today(now, &self.tz);

        let reply = match command {
            Command::Start => {
                let response = users::start(&self.store, user_id, UserCreate::default(), now)?;
                serde_json::to_value(response)?
            }
            Command::Log(text) => {
                let response = diary::log_food(&self.store, user_id, text, now)?;
                serde_json::to_value(response)?
            }
            Command::View => match diary::view_day(&self.store, user_id, today, &self.tz)? {
                Some(view) => serde_json::to_value(view)?,
                None => no_data(format!("No entries for {}", today)),
            },
            Command::Stats(days) => {
                let days = days.unwrap_or(self.config.stats_days);
                let report = diary::period_report(
                    &self.store,
                    user_id,
                    today,
                    days,
                    &self.tz,
                    self.config.recent_limit,
                )?;
                match report {
                    Some(report) => serde_json::to_value(report)?,
                    None => no_data(format!("No entries in the last {} days", days.max(1))),
                }
            }
            Command::History => {
                match diary::history(&self.store, user_id, &self.tz, self.config.recent_days)? {
                    Some(stats) => serde_json::to_value(stats)?,
                    None => no_data("No entries yet".to_string()),
                }
            }
            Command::Goal(goal) => {
                serde_json::to_value(users::set_calorie_goal(&self.store, user_id, *goal, now)?)?
            }
            Command::Progress => {
                serde_json::to_value(diary::daily_progress(&self.store, user_id, today, &self.tz)?)?
            }
            Command::Units(units) => {
                let update = PreferencesUpdate {
                    units: Some(*units),
                    ..Default::default()
                };
                let user = users::update_preferences(&self.store, user_id, &update, now)?;
                serde_json::to_value(user)?
            }
            Command::Delete(id) => {
                diary::delete_entry(&self.store, user_id, *id)?;
                json!({ "deleted": id })
            }
            Command::Help => {
                let commands: Vec<Value> = COMMANDS
                    .iter()
                    .map(|(usage, description)| {
                        json!({ "usage": usage, "description": description })
                    })
                    .collect();
                json!({ "commands": commands })
            }
        };
        Ok(reply)
    }
}

fn no_data(message: String) -> Value {
    json!({ "noData": true, "message": message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations::run_migrations, Database};
    use std::path::PathBuf;

    fn console() -> Console<Database, Utc> {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        let config = Config {
            database_path: PathBuf::from(":memory:"),
            user_id: 12,
            stats_days: 7,
            recent_limit: 5,
            recent_days: 3,
        };
        Console::new(db, config, Utc)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(
            Command::parse("ужин борщ"),
            Ok(Some(Command::Log("ужин борщ".to_string())))
        );
        assert_eq!(
            Command::parse("/log  lunch pasta "),
            Ok(Some(Command::Log("lunch pasta".to_string())))
        );
        assert_eq!(Command::parse("/stats"), Ok(Some(Command::Stats(None))));
        assert_eq!(Command::parse("/stats 30"), Ok(Some(Command::Stats(Some(30)))));
        assert_eq!(Command::parse("/goal 1800"), Ok(Some(Command::Goal(1800.0))));
        assert_eq!(
            Command::parse("/units Imperial"),
            Ok(Some(Command::Units(UnitSystem::Imperial)))
        );
        assert_eq!(Command::parse("/delete 4"), Ok(Some(Command::Delete(EntryId(4)))));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("/log"), Err(CommandError::MissingArgument("/log")));
        assert_eq!(
            Command::parse("/stats week"),
            Err(CommandError::InvalidArgument {
                command: "/stats",
                value: "week".to_string()
            })
        );
        assert_eq!(
            Command::parse("/units stones"),
            Err(CommandError::InvalidArgument {
                command: "/units",
                value: "stones".to_string()
            })
        );
        assert_eq!(
            Command::parse("/weigh"),
            Err(CommandError::Unknown("/weigh".to_string()))
        );
    }

    #[test]
    fn test_session() {
        let console = console();

        let start = console.handle_line("/start", now()).unwrap();
        assert_eq!(start["created"], json!(true));

        let logged = console.handle_line("breakfast eggs", now()).unwrap();
        assert_eq!(logged["entry"]["mealType"], json!("breakfast"));
        assert_eq!(logged["entry"]["foodName"], json!("eggs"));
        assert_eq!(logged["entry"]["calories"], json!(78.0));

        let view = console.handle_line("/view", now()).unwrap();
        assert_eq!(view["entries"].as_array().map(Vec::len), Some(1));

        let progress = console.handle_line("/progress", now()).unwrap();
        assert_eq!(progress["consumed"], json!(78.0));
        assert_eq!(progress["goal"], json!(2000.0));

        let stats = console.handle_line("/stats", now()).unwrap();
        assert_eq!(stats["daysWithEntries"], json!(1));

        let id = logged["entry"]["id"].as_i64().unwrap();
        let deleted = console.handle_line(&format!("/delete {}", id), now()).unwrap();
        assert_eq!(deleted["deleted"], json!(id));

        let history = console.handle_line("/history", now()).unwrap();
        assert_eq!(history["noData"], json!(true));
    }

    #[test]
    fn test_stats_window_larger_than_the_calendar() {
        let console = console();
        console.handle_line("/log pizza", now()).unwrap();

        let stats = console.handle_line("/stats 4000000000", now()).unwrap();
        assert_eq!(stats["totals"]["entryCount"], json!(1));
        assert_eq!(stats["to"], json!("2025-08-14"));
    }

    #[test]
    fn test_failures_become_error_replies() {
        let console = console();
        assert!(console.handle_line("", now()).is_none());

        let reply = console.handle_line("/goal 1500", now()).unwrap();
        assert_eq!(reply["error"], json!("User not found with id: 12"));

        let reply = console.handle_line("/delete 99", now()).unwrap();
        assert!(reply["error"].as_str().unwrap().contains("99"));
    }
}
