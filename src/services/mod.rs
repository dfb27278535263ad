pub mod credentials;
pub use credentials::CredentialService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Registration, TokenGrant};
pub use auth_service_impl::SeaOrmAuthService;

pub mod workout_service;
pub mod workout_service_impl;
pub use workout_service::{LoggedWorkout, WorkoutError, WorkoutService};
pub use workout_service_impl::SeaOrmWorkoutService;

pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService};
pub use account_service_impl::SeaOrmAccountService;

pub mod leaderboard_service;
pub use leaderboard_service::{LeaderboardError, LeaderboardService, SeaOrmLeaderboardService};
