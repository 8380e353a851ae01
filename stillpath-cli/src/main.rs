use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stillpath_core::{
    Goal, MetricKind, MetricPoint, ProgressSnapshot, ScalingConfig, UserStats,
};

mod input;

#[derive(Parser, Debug)]
#[command(name = "stillpath", version, about = "Stillpath progress engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session-history CSV and print the resulting streak state
    Streak {
        /// Path to the history export (date,kind,minutes)
        #[arg(long)]
        log: PathBuf,
    },

    /// Scaling level, next milestone, and adaptive goals for a user
    Report {
        /// ProgressSnapshot JSON from the backend
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Derive the snapshot from a history CSV instead
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Evaluate the built-in achievement catalog against aggregate stats
    Achievements {
        /// UserStats JSON (missing fields default to zero)
        #[arg(long)]
        stats: PathBuf,

        /// Already-earned achievement ids, comma separated
        #[arg(long)]
        earned: Option<String>,
    },

    /// Classify goal health and propose auto-adjustments
    Goals {
        /// JSON array of goals
        #[arg(long)]
        file: PathBuf,

        /// Recent weekly output, for target-increase proposals
        #[arg(long, default_value_t = 0.0)]
        weekly_average: f64,
    },

    /// Average, trend, and a recommendation for one metric series
    Trend {
        /// JSON array of {date, value} points
        #[arg(long)]
        file: PathBuf,

        /// Metric name: happiness, energy, focus, gratitude, stress,
        /// anxiety, or an EI dimension like self_awareness
        #[arg(long)]
        metric: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Streak { log } => {
            let rows = input::parse_session_csv(&log)?;
            let Some(streak) = stillpath_core::replay(&input::to_activity_log(&rows)) else {
                bail!("no usable rows in {}", log.display());
            };
            let today = Utc::now().date_naive();
            println!(
                "Current streak: {} day(s) (since {})",
                streak.current_streak, streak.start_date
            );
            println!("Longest streak: {} day(s)", streak.longest_streak);
            println!("Last activity:  {}", streak.last_activity_date);
            println!(
                "Status:         {}",
                if streak.is_active_on(today) {
                    "active"
                } else {
                    "broken"
                }
            );
        }

        Command::Report { stats, log } => {
            let snapshot: ProgressSnapshot = match (stats, log) {
                (Some(path), _) => input::load_json(&path)?,
                (None, Some(path)) => {
                    input::snapshot_from_rows(&input::parse_session_csv(&path)?)
                }
                (None, None) => bail!("pass --stats <json> or --log <csv>"),
            };
            print_report(&snapshot);
        }

        Command::Achievements { stats, earned } => {
            let stats: UserStats = input::load_json(&stats)?;
            let earned: Vec<String> = earned
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();

            let catalog = stillpath_core::builtin_catalog();
            let unlocked = stillpath_core::evaluate(&catalog, &earned, &stats, Utc::now());
            println!("Newly unlocked: {}", unlocked.len());
            for a in &unlocked {
                println!("  [{:?}] {} (+{} pts)", a.rarity, a.title, a.points);
                for r in &a.rewards {
                    println!("      reward: {} ({:?})", r.description, r.kind);
                }
            }

            let locked = stillpath_core::progress_toward_locked(&catalog, &earned, &stats);
            println!("\nIn progress:");
            for p in locked.iter().filter(|p| p.percent < 100) {
                println!("  {:>3}% {}", p.percent, p.id);
            }
        }

        Command::Goals {
            file,
            weekly_average,
        } => {
            let goals: Vec<Goal> = input::load_json(&file)?;
            let now = Utc::now();
            for goal in &goals {
                let insight = stillpath_core::classify(goal, now);
                println!(
                    "[{:?}/{:?}] {}",
                    insight.health, insight.urgency, insight.message
                );
                println!("    {}", insight.suggestion);
                if let Some(adj) = stillpath_core::auto_adjust(goal, weekly_average, now) {
                    println!("    proposed {:?}: {}", adj.kind, adj.reason);
                }
            }
        }

        Command::Trend { file, metric } => {
            let Some(kind) = MetricKind::parse_name(&metric) else {
                bail!("unknown metric: {metric}");
            };
            let series: Vec<MetricPoint> = input::load_json(&file)?;
            let summary = stillpath_core::average_and_trend(kind, &series);
            println!(
                "{metric}: avg {:.1} over {} point(s), {:?} (change {:+.2})",
                summary.average,
                series.len(),
                summary.trend,
                summary.change
            );
            println!("{}", stillpath_core::recommendation(kind, summary.trend));
        }
    }

    Ok(())
}

fn print_report(snapshot: &ProgressSnapshot) {
    let config = ScalingConfig::default();
    let level = stillpath_core::scaling_level(snapshot);
    let milestone = stillpath_core::next_milestone(snapshot, &config);
    let goals = stillpath_core::adaptive_goals(snapshot, &config);

    println!(
        "Level {level} ({:?}) | {} sessions, {} min, streak {}/{}",
        stillpath_core::level_tier(level),
        snapshot.total_sessions,
        snapshot.total_minutes,
        snapshot.current_streak,
        snapshot.longest_streak
    );
    println!(
        "Next milestone: {:?} {}/{} ({}%)",
        milestone.kind, milestone.current, milestone.target, milestone.progress_percent
    );
    println!(
        "Adaptive goals: {} min/day, {} min/week",
        goals.daily_minutes, goals.weekly_goal
    );
    println!("Monthly challenge: {}", goals.monthly_challenge);

    let recs = stillpath_core::recommendations(snapshot, level);
    if !recs.is_empty() {
        println!("\nRecommendations:");
        for r in &recs {
            println!("  - {r}");
        }
    }
}
