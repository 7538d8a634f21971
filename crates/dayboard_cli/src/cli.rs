//! Command-line surface.
//!
//! Global flags resolve before the config file: `--data-dir` and
//! `--log-level` also read `DAYBOARD_DATA_DIR` / `DAYBOARD_LOG_LEVEL`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dayboard_core::{Priority, Quadrant, ReminderKind, TaskFilter, TaskSort, TrackingPeriod};

/// Dayboard - personal goals, habits, tasks and reflections
#[derive(Parser, Debug)]
#[command(name = "dayboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the database
    #[arg(long, global = true, env = "DAYBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "DAYBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Config file (defaults to <config dir>/dayboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat this date as today
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Long-term goals and milestones
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Habits and completion streaks
    #[command(subcommand)]
    Habit(HabitCommand),

    /// To-do list and Eisenhower matrix
    #[command(subcommand)]
    Task(TaskCommand),

    /// Daily reflection journal
    #[command(subcommand)]
    Reflect(ReflectCommand),

    /// Skill development
    #[command(subcommand)]
    Skill(SkillCommand),

    /// Notification preferences
    #[command(subcommand)]
    Notify(NotifyCommand),

    /// Scheduled reminders
    #[command(subcommand)]
    Remind(RemindCommand),

    /// Weekly review and plan
    #[command(subcommand)]
    Week(WeekCommand),

    /// Dashboard totals
    Summary,

    /// Write every stored key to a JSON file
    Export {
        /// Output path; `-` writes to stdout
        #[arg(short, long, default_value = dayboard_core::EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Replace stored data with an exported JSON file
    Import {
        /// File produced by `export`
        path: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub target: f64,

    #[arg(long, value_name = "YYYY-MM-DD")]
    pub deadline: NaiveDate,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value_t = 0.0)]
    pub current: f64,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    List,
    Add(GoalArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: GoalArgs,
    },
    /// Set current progress (clamped to 0..=target)
    Progress {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    Delete { id: String },
    /// Append a milestone to a goal
    Milestone { goal_id: String, description: String },
    /// Flip a milestone's completed flag
    ToggleMilestone { goal_id: String, milestone_id: String },
}

#[derive(Args, Debug, Clone)]
pub struct HabitArgs {
    #[arg(long)]
    pub name: String,

    /// Completions per period that keep the streak alive
    #[arg(long, default_value_t = 1)]
    pub frequency: u32,

    /// daily|weekly|monthly
    #[arg(long, default_value = "daily")]
    pub period: TrackingPeriod,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub category: String,
}

#[derive(Subcommand, Debug)]
pub enum HabitCommand {
    List,
    Add(HabitArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: HabitArgs,
    },
    Delete { id: String },
    /// Mark or unmark a completion date (defaults to today)
    Toggle {
        id: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Show the check-box window for a habit
    Days { id: String },
    /// Recompute every stored streak
    Refresh,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    List {
        #[arg(long)]
        hide_completed: bool,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,

        /// all|high|medium|low|tag:<name>|<quadrant>
        #[arg(long, default_value = "all")]
        filter: TaskFilter,

        /// due|priority|estimate|manual
        #[arg(long, default_value = "due")]
        sort: TaskSort,
    },
    Add {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        due: Option<NaiveDate>,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        /// Quadrant label or code (iu|in|nu|nn)
        #[arg(long, default_value = "iu")]
        quadrant: Quadrant,

        /// Estimated minutes
        #[arg(long, default_value_t = dayboard_core::model::task::DEFAULT_ESTIMATED_MINUTES)]
        estimate: u32,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Done { id: String },
    Undo { id: String },
    Delete { id: String },
    /// Move a task to another quadrant
    Move { id: String, quadrant: Quadrant },
    /// Move the task at one position to another (0-based)
    Reorder { from: usize, to: usize },
    /// Log one 25 minute focus session
    Focus { id: String },
    Matrix,
    Tags,
}

#[derive(Subcommand, Debug)]
pub enum ReflectCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        content: String,

        #[arg(long, default_value = "")]
        lessons: String,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    Delete { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct SkillArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value_t = 1)]
    pub current_level: u32,

    #[arg(long, default_value_t = 10)]
    pub target_level: u32,
}

#[derive(Subcommand, Debug)]
pub enum SkillCommand {
    List,
    Add(SkillArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: SkillArgs,
    },
    /// Set progress percentage (clamped to 0..=100)
    Progress {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    List,
    /// Flip a notification type, e.g. "Daily Reflection"
    Toggle { kind: String },
}

#[derive(Subcommand, Debug)]
pub enum RemindCommand {
    List,
    Add {
        /// daily|weekly|monthly|task
        kind: ReminderKind,

        /// 24h clock time, HH:MM
        time: String,

        /// Weekday names; defaults to monday..friday
        #[arg(long = "day")]
        days: Vec<String>,
    },
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum WeekCommand {
    /// Print the review and plan for a week
    Show {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Update review fields; unspecified fields keep their value
    Review {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        #[arg(long)]
        accomplishments: Option<String>,
        #[arg(long)]
        challenges: Option<String>,
        #[arg(long)]
        lessons: Option<String>,
        #[arg(long)]
        gratitude: Option<String>,
    },
    /// Update plan fields; repeated values fill slots in order
    Plan {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        #[arg(long = "goal")]
        goals: Vec<String>,
        /// Progress for the goal slot at the same position
        #[arg(long = "goal-progress")]
        goal_progress: Vec<f64>,
        #[arg(long = "task")]
        tasks: Vec<String>,
        #[arg(long = "focus")]
        focus: Vec<String>,
        #[arg(long)]
        development: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, TaskCommand};
    use clap::Parser;
    use dayboard_core::{Priority, Quadrant, TaskSort};

    #[test]
    fn parses_task_add_with_typed_values() {
        let cli = Cli::parse_from([
            "dayboard", "task", "add", "Write report", "--priority", "high", "--quadrant", "nu",
            "--due", "2024-05-01", "--tag", "work",
        ]);
        match cli.command {
            Commands::Task(TaskCommand::Add {
                title,
                priority,
                quadrant,
                due,
                tags,
                estimate,
                ..
            }) => {
                assert_eq!(title, "Write report");
                assert_eq!(priority, Priority::High);
                assert_eq!(quadrant, Quadrant::NotImportantUrgent);
                assert_eq!(due.unwrap().to_string(), "2024-05-01");
                assert_eq!(tags, vec!["work"]);
                assert_eq!(estimate, 30);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::parse_from([
            "dayboard", "task", "list", "--sort", "priority", "--data-dir", "/tmp/db",
        ]);
        assert_eq!(cli.data_dir.unwrap().to_str(), Some("/tmp/db"));
        match cli.command {
            Commands::Task(TaskCommand::List { sort, .. }) => assert_eq!(sort, TaskSort::Priority),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_priority() {
        let result = Cli::try_parse_from(["dayboard", "task", "add", "x", "--priority", "urgent"]);
        assert!(result.is_err());
    }
}
