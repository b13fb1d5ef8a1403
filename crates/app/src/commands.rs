use anyhow::Context;
use practice_core::Clock;
use practice_core::model::{Accuracy, DailyGoal, SessionTransition};
use services::{AppServices, ProgressTracker};
use std::sync::Arc;
use storage::Storage;
use storage::seed::demo_snapshot;

use crate::config::{AppConfig, Command};
use crate::output;

const IDLE: &str = "no active session\n";

/// Run one subcommand against the store and return the text to print.
pub async fn execute(
    config: &AppConfig,
    clock: Clock,
    command: Command,
) -> anyhow::Result<String> {
    let text = match command {
        Command::Seed { days } => seed(config, clock, days).await?,
        Command::Status => output::status(&tracker(config, clock).await?.view().await),
        Command::Week => output::week(&tracker(config, clock).await?.view().await.week),
        Command::Start { category } => {
            match tracker(config, clock).await?.start_session(category).await? {
                SessionTransition::Started => format!("started {category} session\n"),
                SessionTransition::Replaced => {
                    format!("started {category} session (previous session discarded)\n")
                }
            }
        }
        Command::Answer { answer } => {
            let tracker = tracker(config, clock).await?;
            match tracker.answer_question(answer.is_correct()).await? {
                Some(progress) => output::session_line(&progress),
                None => IDLE.to_string(),
            }
        }
        Command::End { score } => {
            let tracker = tracker(config, clock).await?;
            let update = match score {
                Some(percent) => tracker.end_session(Accuracy::new(percent)?).await?,
                None => tracker.finish_session().await?,
            };
            update.map_or_else(|| IDLE.to_string(), |u| output::update(&u))
        }
        Command::Abandon => match tracker(config, clock).await?.abandon_session().await? {
            Some(session) => format!("abandoned {} session\n", session.category()),
            None => IDLE.to_string(),
        },
        Command::Goal { minutes } => {
            let goal = DailyGoal::new(minutes)?;
            let previous = tracker(config, clock).await?.set_daily_goal(goal).await?;
            let mut text = format!("daily goal {previous} -> {goal}\n");
            if !goal.is_standard_choice() {
                text.push_str("note: usual choices are 5, 10, 15 or 20 minutes\n");
            }
            text
        }
        Command::Sync => {
            if open(config, clock).await?.daily().sync_today().await? {
                "synced today's progress\n".to_string()
            } else {
                "nothing practiced today\n".to_string()
            }
        }
    };

    Ok(text)
}

async fn open(config: &AppConfig, clock: Clock) -> anyhow::Result<AppServices> {
    AppServices::new_sqlite(&config.db_url, clock)
        .await
        .context("loading progress")
}

async fn tracker(config: &AppConfig, clock: Clock) -> anyhow::Result<Arc<ProgressTracker>> {
    Ok(open(config, clock).await?.tracker())
}

async fn seed(config: &AppConfig, clock: Clock, days: u32) -> anyhow::Result<String> {
    let storage = Storage::sqlite(&config.db_url)
        .await
        .context("opening progress store")?;
    let snapshot = demo_snapshot(clock.today(), days, DailyGoal::default());
    storage.progress.save_snapshot(&snapshot).await?;
    tracing::info!(days, "seeded demo progress");
    Ok(format!(
        "seeded a {days}-day streak with {} history entries\n",
        snapshot.weekly_progress().len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Answer, prepare_sqlite_file};
    use chrono::Duration;
    use practice_core::model::PracticeCategory;
    use practice_core::time::fixed_today;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let db_url = format!("sqlite://{}", dir.path().join("practice.sqlite3").display());
        prepare_sqlite_file(&db_url).unwrap();
        let config = AppConfig {
            db_url,
            log_filter: "off".into(),
        };
        (dir, config)
    }

    fn on_day(offset: i64) -> Clock {
        Clock::fixed_on(fixed_today() + Duration::days(offset))
    }

    async fn run(config: &AppConfig, day: i64, command: Command) -> String {
        execute(config, on_day(day), command).await.unwrap()
    }

    async fn full_session(config: &AppConfig, day: i64, category: PracticeCategory) -> String {
        run(config, day, Command::Start { category }).await;
        for _ in 0..10 {
            run(config, day, Command::Answer { answer: Answer::Correct }).await;
        }
        run(config, day, Command::End { score: None }).await
    }

    #[tokio::test]
    async fn sessions_persist_between_invocations() {
        let (_dir, config) = temp_config();
        run(&config, 0, Command::Goal { minutes: 2 }).await;

        let started = run(
            &config,
            0,
            Command::Start {
                category: PracticeCategory::Grammar,
            },
        )
        .await;
        assert!(started.starts_with("started "));

        let mut last = String::new();
        for _ in 0..10 {
            last = run(&config, 0, Command::Answer { answer: Answer::Correct }).await;
        }
        assert!(last.contains("10/10 answered, 10 correct (finished)"));

        let ended = run(&config, 0, Command::End { score: None }).await;
        assert!(ended.contains("at 100%: 2 min today"));
        assert!(ended.contains("goal met, streak started"));

        let status = run(&config, 0, Command::Status).await;
        assert!(status.contains("2/2 min (100%)  goal met"));
        assert!(status.contains("streak 1 (best 1), 1 days practiced"));
        assert!(status.contains("no active session"));

        let ended = full_session(&config, 1, PracticeCategory::Speaking).await;
        assert!(ended.contains("goal met, streak extended"));
        let status = run(&config, 1, Command::Status).await;
        assert!(status.contains("streak 2 (best 2), 2 days practiced"));
    }

    #[tokio::test]
    async fn idle_commands_report_no_session() {
        let (_dir, config) = temp_config();
        assert_eq!(run(&config, 0, Command::End { score: Some(50) }).await, IDLE);
        assert_eq!(run(&config, 0, Command::Abandon).await, IDLE);
        assert_eq!(
            run(&config, 0, Command::Answer { answer: Answer::Wrong }).await,
            IDLE
        );
    }

    #[tokio::test]
    async fn abandon_drops_session_without_credit() {
        let (_dir, config) = temp_config();
        run(
            &config,
            0,
            Command::Start {
                category: PracticeCategory::Listening,
            },
        )
        .await;
        let text = run(&config, 0, Command::Abandon).await;
        assert!(text.starts_with("abandoned "));

        let status = run(&config, 0, Command::Status).await;
        assert!(status.contains(" 0/10 min (0%)"));
        assert!(status.contains("no active session"));
    }

    #[tokio::test]
    async fn unusual_goal_gets_a_note() {
        let (_dir, config) = temp_config();
        let text = run(&config, 0, Command::Goal { minutes: 7 }).await;
        assert!(text.starts_with("daily goal 10 min -> 7 min"));
        assert!(text.contains("note: usual choices"));

        let text = run(&config, 0, Command::Goal { minutes: 15 }).await;
        assert!(!text.contains("note:"));
    }

    #[tokio::test]
    async fn seeded_streak_is_extended_today() {
        let (_dir, config) = temp_config();
        let seeded = run(&config, 0, Command::Seed { days: 5 }).await;
        assert!(seeded.starts_with("seeded a 5-day streak"));
        assert!(run(&config, 0, Command::Status).await.contains("streak 5 (best 5)"));

        let mut last = String::new();
        for category in PracticeCategory::ALL.into_iter().cycle().take(5) {
            last = full_session(&config, 0, category).await;
        }
        assert!(last.contains("goal met, streak extended"));
        assert!(run(&config, 0, Command::Status).await.contains("streak 6 (best 6)"));
    }

    #[tokio::test]
    async fn week_shows_seven_days() {
        let (_dir, config) = temp_config();
        run(&config, 0, Command::Seed { days: 3 }).await;
        let text = run(&config, 0, Command::Week).await;
        assert_eq!(text.lines().count(), 7);
    }

    #[tokio::test]
    async fn sync_needs_practice_today() {
        let (_dir, config) = temp_config();
        assert_eq!(
            run(&config, 0, Command::Sync).await,
            "nothing practiced today\n"
        );
        full_session(&config, 0, PracticeCategory::Vocabulary).await;
        assert_eq!(
            run(&config, 0, Command::Sync).await,
            "synced today's progress\n"
        );
    }
}
