//! Product-stream orchestration.
//!
//! The tracker resolves every coefficient from a [`ParameterProvider`], runs the flux
//! components for each product stream and assembles the carbon [`Ledger`].
//!
//! # Data flow
//!
//! ```text
//! Biofuel ──> BiofuelSplit ──charcoal──┐
//! Biochar ─────────────────────────────┴──> BiocharPool
//!
//! <stream> ──> DisposalCurve ──> RecyclingSplit? ──landfill input──┐
//!                                                                   ├── summed per group ──> LandfillCohorts
//! <stream> ──> DisposalCurve ──> RecyclingSplit? ──landfill input──┘
//! ```
//!
//! Streams share nothing and are solved in parallel. Each landfill group waits for all of
//! its streams, then the groups are solved in parallel as well.

use crate::config::{LandfillGroup, ProductStream, TrackerConfig};
use crate::io::ProductionTable;
use crate::ledger::Ledger;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};
use wpct_components::{
    BiocharParameters, BiocharPool, BiofuelParameters, BiofuelSplit, DisposalCurve,
    DisposalParameters, LandfillCohorts, LandfillOutputs, LandfillParameters, RecyclingParameters,
    RecyclingSplit,
};
use wpct_core::errors::WpctResult;
use wpct_core::integrate::Integrator;
use wpct_core::parameters::{normalise_fraction, ParameterProvider};
use wpct_core::standard_variables::{
    StreamVariable, VAR_BIOCHAR_DECAY, VAR_BIOCHAR_STOCK, VAR_FUEL_EMISSIONS,
    VAR_LANDFILL_DECAY_TOTAL, VAR_LANDFILL_INPUT_TOTAL, VAR_LANDFILL_STOCK_TOTAL,
};
use wpct_core::timeseries::AnnualSeries;

pub const PRODUCT_BIOFUEL: &str = "Biofuel";
pub const PRODUCT_BIOCHAR: &str = "Biochar";
pub const PRODUCT_LANDFILL: &str = "Landfill";

/// Resolved inputs of one in-use product stream
struct StreamPlan<'a> {
    stream: &'a ProductStream,
    production: &'a AnnualSeries,
    disposal: DisposalCurve,
    recycling: Option<RecyclingSplit>,
}

/// Solved series of one in-use product stream
#[derive(Debug, Clone)]
pub struct StreamResult {
    pub in_use: AnnualSeries,
    pub disposed: AnnualSeries,
    pub recycled: Option<AnnualSeries>,
    pub landfill_input: AnnualSeries,
}

impl StreamPlan<'_> {
    fn solve(&self, years: usize) -> WpctResult<StreamResult> {
        let disposal = self.disposal.solve(self.production, years)?;
        let (recycled, landfill_input) = match &self.recycling {
            Some(recycling) => {
                let split = recycling.solve(&disposal.disposed, years)?;
                (Some(split.recycled), split.landfill)
            }
            None => (None, disposal.disposed.clone()),
        };
        debug!(stream = %self.stream.name, "stream solved");

        Ok(StreamResult {
            in_use: disposal.in_use,
            disposed: disposal.disposed,
            recycled,
            landfill_input,
        })
    }
}

/// Runs the full set of product streams for one region.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    integrator: Arc<dyn Integrator>,
}

impl Tracker {
    /// Validate the configuration and select the integrator for all runs of this tracker.
    pub fn new(config: TrackerConfig) -> WpctResult<Self> {
        config.validate()?;
        let integrator = config.integrator.build();
        info!(
            integrator = %config.integrator,
            streams = config.streams.len(),
            landfill_groups = config.landfill_groups.len(),
            "tracker configured"
        );
        Ok(Self { config, integrator })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn biofuel(&self, parameters: &dyn ParameterProvider) -> WpctResult<BiofuelSplit> {
        let efficiency = parameters.get(PRODUCT_BIOFUEL, "efficiency")?;
        Ok(BiofuelSplit::from_parameters(BiofuelParameters {
            efficiency: normalise_fraction(efficiency),
        }))
    }

    fn biochar(&self, parameters: &dyn ParameterProvider) -> WpctResult<BiocharPool> {
        Ok(BiocharPool::from_parameters(BiocharParameters {
            decay_1: parameters.get(PRODUCT_BIOCHAR, "decay_1")?,
            decay_2: parameters.get(PRODUCT_BIOCHAR, "decay_2")?,
        }))
    }

    fn plan<'a>(
        &self,
        stream: &'a ProductStream,
        data: &'a ProductionTable,
        parameters: &dyn ParameterProvider,
    ) -> WpctResult<StreamPlan<'a>> {
        let product = stream.name.as_str();
        let disposal = DisposalCurve::from_parameters(DisposalParameters {
            disposal_1: parameters.get(product, "disposal_1")?,
            disposal_2: parameters.get(product, "disposal_2")?,
            disposal_3: parameters.get(product, "disposal_3")?,
        })
        .with_integrator(self.integrator.clone());

        let recycling = if stream.recycles {
            Some(RecyclingSplit::from_parameters(RecyclingParameters {
                recycle_1: parameters.get(product, "recycle_1")?,
                recycle_2: parameters.get(product, "recycle_2")?,
            }))
        } else {
            None
        };

        Ok(StreamPlan {
            stream,
            production: data.series(product)?,
            disposal,
            recycling,
        })
    }

    fn landfill(
        &self,
        group: &LandfillGroup,
        parameters: &dyn ParameterProvider,
    ) -> WpctResult<LandfillCohorts> {
        let (decay_1, decay_2) = group.decay_variables();
        LandfillCohorts::from_parameters(LandfillParameters {
            decay_1: parameters.get(PRODUCT_LANDFILL, &decay_1)?,
            decay_2: parameters.get(PRODUCT_LANDFILL, &decay_2)?,
        })
    }

    /// Compute the carbon ledger for the given production and parameters.
    ///
    /// All parameters and production series are resolved before any model runs, so a
    /// missing or invalid parameter aborts the run without partial results.
    pub fn run(
        &self,
        data: &ProductionTable,
        parameters: &dyn ParameterProvider,
    ) -> WpctResult<Ledger> {
        let years = data.horizon();
        info!(years, "starting carbon tracker run");

        let biofuel = self.biofuel(parameters)?;
        let biochar = self.biochar(parameters)?;
        let fuel = data.series(PRODUCT_BIOFUEL)?;
        let explicit_biochar = data.series(PRODUCT_BIOCHAR)?;
        let plans = self
            .config
            .streams
            .iter()
            .map(|stream| self.plan(stream, data, parameters))
            .collect::<WpctResult<Vec<_>>>()?;
        let landfills = self
            .config
            .landfill_groups
            .iter()
            .map(|group| -> WpctResult<_> { Ok((group, self.landfill(group, parameters)?)) })
            .collect::<WpctResult<Vec<_>>>()?;

        // Energy chain
        let split = biofuel.solve(fuel, years)?;
        let charcoal = explicit_biochar.padded(years).add(&split.charcoal_inflow);
        let char_pool = biochar.solve(&charcoal, years)?;
        info!("energy chain solved");

        // In-use streams
        let results = plans
            .par_iter()
            .map(|plan| plan.solve(years))
            .collect::<WpctResult<Vec<_>>>()?;
        info!(streams = results.len(), "product streams solved");

        // Landfill groups
        let landfill_inputs: Vec<AnnualSeries> = landfills
            .iter()
            .map(|(group, _)| {
                AnnualSeries::sum_all(
                    plans
                        .iter()
                        .zip(&results)
                        .filter(|(plan, _)| plan.stream.landfill_group == group.key)
                        .map(|(_, result)| &result.landfill_input),
                )
                .padded(years)
            })
            .collect();
        let landfill_outputs = landfills
            .par_iter()
            .zip(landfill_inputs.par_iter())
            .map(|((_, landfill), input)| landfill.solve(input))
            .collect::<WpctResult<Vec<LandfillOutputs>>>()?;
        info!(groups = landfill_outputs.len(), "landfill groups solved");

        let mut ledger = Ledger::new(data.years().to_vec());
        ledger.insert(VAR_FUEL_EMISSIONS.name, &split.emissions);
        ledger.insert(VAR_BIOCHAR_STOCK.name, &char_pool.stock);
        ledger.insert(VAR_BIOCHAR_DECAY.name, &char_pool.decay);

        for (plan, result) in plans.iter().zip(&results) {
            let label = plan.stream.label.as_str();
            ledger.insert(StreamVariable::InUse.column_name(label), &result.in_use);
            ledger.insert(StreamVariable::Disposed.column_name(label), &result.disposed);
            if let Some(recycled) = &result.recycled {
                ledger.insert(StreamVariable::Recycled.column_name(label), recycled);
            }
            ledger.insert(
                StreamVariable::LandfillIn.column_name(label),
                &result.landfill_input,
            );
        }

        ledger.insert(
            VAR_LANDFILL_INPUT_TOTAL.name,
            &AnnualSeries::sum_all(&landfill_inputs),
        );
        ledger.insert(
            VAR_LANDFILL_STOCK_TOTAL.name,
            &AnnualSeries::sum_all(landfill_outputs.iter().map(|o| &o.pool)),
        );
        ledger.insert(
            VAR_LANDFILL_DECAY_TOTAL.name,
            &AnnualSeries::sum_all(landfill_outputs.iter().map(|o| &o.decay)),
        );

        info!(columns = ledger.column_names().count(), "ledger assembled");
        Ok(ledger)
    }
}
