//! Flux components
//!
//! - `BiofuelSplit`: fuel burned into charcoal-forming and emitted carbon
//! - `BiocharPool`: charcoal stock with a pool-size dependent decay rate
//! - `DisposalCurve`: in-use stock and disposals from a bell-shaped hazard
//! - `RecyclingSplit`: disposals divided into recycled and landfill-bound carbon
//! - `LandfillCohorts`: landfill stock and decomposition from a lognormal survival curve

mod biochar;
mod biofuel;
mod disposal;
mod landfill;
mod recycling;

pub use biochar::{BiocharOutputs, BiocharParameters, BiocharPool};
pub use biofuel::{BiofuelOutputs, BiofuelParameters, BiofuelSplit};
pub use disposal::{DisposalCurve, DisposalOutputs, DisposalParameters};
pub use landfill::{LandfillCohorts, LandfillOutputs, LandfillParameters};
pub use recycling::{RecyclingOutputs, RecyclingParameters, RecyclingSplit};
