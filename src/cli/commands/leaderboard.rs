use crate::config::Config;
use crate::db::Store;
use crate::domain::SortKey;
use crate::services::{LeaderboardService, SeaOrmLeaderboardService};

pub async fn cmd_leaderboard(config: &Config, relative: bool, sort: &str) -> anyhow::Result<()> {
    let sort: SortKey = sort.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let store = Store::new(&config.general.database_path).await?;
    let service = SeaOrmLeaderboardService::new(store);

    if relative {
        let rows = service.relative().await?;
        if rows.is_empty() {
            println!("No users yet.");
            return Ok(());
        }

        println!(
            "{:<4} {:<24} {:>8} {:>8} {:>8} {:>8}",
            "#", "User", "Bench", "Squat", "Deadlift", "Ratio"
        );
        println!("{:-<66}", "");
        for (i, row) in rows.iter().enumerate() {
            println!(
                "{:<4} {:<24} {:>8} {:>8} {:>8} {:>8.2}",
                i + 1,
                row.username,
                row.bench,
                row.squat,
                row.deadlift,
                row.bodyweight_ratio
            );
        }
    } else {
        let rows = service.absolute(sort).await?;
        if rows.is_empty() {
            println!("No users yet.");
            return Ok(());
        }

        println!(
            "{:<4} {:<24} {:>8} {:>8} {:>8} {:>8}",
            "#", "User", "Bench", "Squat", "Deadlift", "Total"
        );
        println!("{:-<66}", "");
        for (i, row) in rows.iter().enumerate() {
            println!(
                "{:<4} {:<24} {:>8} {:>8} {:>8} {:>8}",
                i + 1,
                row.username,
                row.bench,
                row.squat,
                row.deadlift,
                row.total
            );
        }
    }

    Ok(())
}
