//! Carbon flux models for harvested wood products.
//!
//! Each model is a component built from a parameters struct and solved over annual
//! series. Within one product stream the components chain:
//!
//! ```text
//! fuel ──> BiofuelSplit ──charcoal──> BiocharPool
//!
//! production ──> DisposalCurve ──disposed──> RecyclingSplit ──landfill──> LandfillCohorts
//! ```
//!
//! Components hold no state between calls; a `solve` call owns its input and output
//! series, so independent streams can be solved concurrently.

pub mod components;

pub use components::{
    BiocharOutputs, BiocharParameters, BiocharPool, BiofuelOutputs, BiofuelParameters,
    BiofuelSplit, DisposalCurve, DisposalOutputs, DisposalParameters, LandfillCohorts,
    LandfillOutputs, LandfillParameters, RecyclingOutputs, RecyclingParameters, RecyclingSplit,
};
