pub mod error;
pub mod settings;
pub mod state;

pub use error::{BatError, Result};
pub use settings::PollSettings;
pub use state::{
    Alert, BatteryReport, BatterySnapshot, BatteryStatus, ChargeState, IconTier,
};
