mod init;
mod leaderboard;
mod migrate;

pub use init::cmd_init;
pub use leaderboard::cmd_leaderboard;
pub use migrate::cmd_migrate;
