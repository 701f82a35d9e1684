mod detector;
mod driver;
mod session;

pub use detector::{Detector, ScriptedDetector, SimulatedDetector};
pub use driver::DrillDriver;
pub use session::{
    format_clock, DrillEffect, DrillEvent, DrillFlow, DrillMetrics, DrillSession, DrillState,
};
