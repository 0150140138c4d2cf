//! Command-line argument definitions.

use std::path::PathBuf;

use agenda_core::{Criterion, EventId};
use clap::{Args, Parser, Subcommand};

/// Personal event scheduler.
///
/// Stores calendar events, answers date and text queries over them, and
/// reports events whose times overlap on the same day.
#[derive(Debug, Parser)]
#[command(name = "agenda", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an event.
    Add {
        /// Event title.
        #[arg(long)]
        title: String,

        /// Date (YYYY-MM-DD, today, tomorrow, "3 days ago", "in 2 days").
        #[arg(long, default_value = "today")]
        date: String,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Replace fields on an existing event.
    Edit {
        /// The event ID.
        id: EventId,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New date.
        #[arg(long)]
        date: Option<String>,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Delete an event.
    Delete {
        /// The event ID.
        id: EventId,
    },

    /// Mark an event completed.
    Complete {
        /// The event ID.
        id: EventId,
    },

    /// List events, optionally searched and filtered.
    List {
        /// Case-insensitive text to look for in title, description and location.
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter: all, thisMonth, previousMonth, upcoming, completed.
        #[arg(short, long, default_value = "all")]
        filter: Criterion,

        /// Reference month for month filters (YYYY-MM). Defaults to this month.
        #[arg(long)]
        month: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the next open events.
    Upcoming {
        /// Maximum number of events (defaults to `upcoming_limit` from config).
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Report overlapping events not yet acknowledged.
    Conflicts {
        /// Acknowledge every reported conflict so it is not shown again.
        #[arg(long)]
        ack: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show event counts and when the store was last written.
    Status,

    /// Show one day's events and conflicts.
    Day {
        /// The date (defaults to today).
        #[arg(default_value = "today")]
        date: String,
    },

    /// Show the Monday-to-Sunday week around a date.
    Week {
        /// Any date in the week (defaults to today).
        #[arg(default_value = "today")]
        date: String,
    },

    /// Show a Monday-first month grid.
    Month {
        /// The month (YYYY-MM). Defaults to the current month.
        month: Option<String>,
    },
}

/// Optional event fields shared by `add` and `edit`.
#[derive(Debug, Default, Args)]
pub struct EventFields {
    /// Start time (HH:MM).
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM).
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Hex color or color name.
    #[arg(long)]
    pub color: Option<String>,
}
