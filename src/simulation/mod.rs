//! Frame simulation
//!
//! Kinematic integration, particle aging, spawning and the per-frame
//! scheduler that runs them in a fixed order.

pub mod kinematics;
pub mod scheduler;
pub mod spawner;

pub use kinematics::integrate;
pub use scheduler::{FrameReport, FrameScheduler, FrameStats};
pub use spawner::{SpawnClock, SpawnPolicy, Spawner, SurfaceSpawner, MAX_SPAWNS_PER_FRAME};
