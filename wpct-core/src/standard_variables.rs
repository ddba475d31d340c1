//! Standard ledger variables.
//!
//! Column names of the carbon ledger follow the tracker's historical output table:
//! `Fuel_Emissions`, `Biochar_Stock`, `<Product>_InUse`, `LF_Decay_Total`, and so on.
//! Fixed columns are declared with [`define_variable!`]; per-product columns are built
//! from a [`StreamVariable`] and the product's label.
//!
//! ```rust
//! use wpct_core::standard_variables::{StreamVariable, VAR_BIOCHAR_STOCK};
//!
//! assert_eq!(VAR_BIOCHAR_STOCK.name, "Biochar_Stock");
//! assert_eq!(StreamVariable::InUse.column_name("GraphicPaper"), "GraphicPaper_InUse");
//! ```

/// A fixed ledger column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: &'static str,
}

impl VariableDefinition {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// Declare a static [`VariableDefinition`].
#[macro_export]
macro_rules! define_variable {
    (
        $var_name:ident,
        name = $name:expr,
        description = $desc:expr $(,)?
    ) => {
        #[doc = concat!("Ledger column `", $name, "`: ", $desc)]
        pub static $var_name: $crate::standard_variables::VariableDefinition =
            $crate::standard_variables::VariableDefinition::new($name);
    };
}

pub use crate::define_variable;

// ============================================================================
// Energy chain
// ============================================================================

define_variable!(
    VAR_FUEL_EMISSIONS,
    name = "Fuel_Emissions",
    description = "Carbon emitted by burning biofuel",
);

define_variable!(
    VAR_BIOCHAR_STOCK,
    name = "Biochar_Stock",
    description = "Carbon held in the charcoal pool after the year's decay",
);

define_variable!(
    VAR_BIOCHAR_DECAY,
    name = "Biochar_Decay",
    description = "Carbon lost from the charcoal pool during the year",
);

// ============================================================================
// Landfill totals
// ============================================================================

define_variable!(
    VAR_LANDFILL_INPUT_TOTAL,
    name = "LF_Input_Total",
    description = "Carbon entering landfill from all product streams",
);

define_variable!(
    VAR_LANDFILL_STOCK_TOTAL,
    name = "LF_Stock_Total",
    description = "Carbon remaining in landfill across all decay groups",
);

define_variable!(
    VAR_LANDFILL_DECAY_TOTAL,
    name = "LF_Decay_Total",
    description = "Carbon decomposed in landfill across all decay groups",
);

/// Per-product ledger columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamVariable {
    InUse,
    Disposed,
    Recycled,
    LandfillIn,
}

impl StreamVariable {
    pub fn suffix(&self) -> &'static str {
        match self {
            StreamVariable::InUse => "InUse",
            StreamVariable::Disposed => "Disposed",
            StreamVariable::Recycled => "Recycled",
            StreamVariable::LandfillIn => "LandfillIn",
        }
    }

    pub fn column_name(&self, label: &str) -> String {
        format!("{}_{}", label, self.suffix())
    }
}
