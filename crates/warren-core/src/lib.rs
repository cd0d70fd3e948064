//! Engine orchestration for the Warren tracker.
//!
//! This crate wires the pure rule crates (`warren-tasks`, `warren-pet`,
//! `warren-social`, `warren-ledger`) to the data layer (`warren-db`).
//! Every operation follows the same shape: open one transaction, check
//! preconditions against the rows it reads, run the pure planners, apply
//! the writes through the stores, append currency-audit entries, commit.
//! A failure anywhere rolls the whole operation back -- no caller ever
//! observes gold deducted without the thing it paid for.
//!
//! # Modules
//!
//! - [`engine`] -- The [`Engine`] handle (pool + clock)
//! - [`clock`] -- The injected time source ([`Clock`], [`SystemClock`],
//!   [`FixedClock`])
//! - [`config`] -- YAML configuration loading
//! - [`error`] -- The error taxonomy ([`EngineError`], [`ErrorKind`])
//! - [`users`] -- Account provisioning (balances + pet)
//! - [`habits`] -- Habit CRUD, logging, paid difficulty changes, deletion
//! - [`dailies`] -- Daily CRUD and completion
//! - [`todos`] -- To-do CRUD and completion
//! - [`rewards`] -- Reward CRUD and redemption
//! - [`pets`] -- Pet care: shop, inventory, equipment, renaming
//! - [`groups`] -- Group lifecycle, membership moderation, chat
//! - [`challenges`] -- Challenge lifecycle and participation
//! - [`maintenance`] -- The nightly batch reset

pub mod challenges;
pub mod clock;
pub mod config;
pub mod dailies;
pub mod engine;
pub mod error;
pub mod groups;
pub mod habits;
pub mod maintenance;
pub mod pets;
pub mod rewards;
pub mod todos;
pub mod users;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, LoggingConfig, StorageConfig};
pub use engine::Engine;
pub use error::{EngineError, ErrorKind};
pub use maintenance::MaintenanceReport;

// Re-export operation inputs and outcomes for the request layer.
pub use challenges::NewChallenge;
pub use dailies::{DailyOutcome, DailyUpdate, NewDaily};
pub use groups::{GroupUpdate, NewGroup};
pub use habits::{HabitLogOutcome, HabitUpdate, NewHabit};
pub use pets::PurchaseOutcome;
pub use rewards::{NewReward, RedeemOutcome, RewardUpdate};
pub use todos::{NewTodo, TodoOutcome, TodoUpdate};
pub use users::{STARTING_GEMS, STARTING_GOLD};
