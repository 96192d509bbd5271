//! Core traits for equipment models.

use crate::cost::{CostIndex, UnitCost};
use crate::error::{DesignError, DesignResult};
use br_streams::StreamState;

/// Stream snapshots wired to a unit for one sizing pass.
///
/// Inlet and outlet order is fixed per unit type and documented on the unit.
#[derive(Clone, Copy, Debug)]
pub struct UnitStreams<'a> {
    pub ins: &'a [StreamState],
    pub outs: &'a [StreamState],
}

impl<'a> UnitStreams<'a> {
    pub fn new(ins: &'a [StreamState], outs: &'a [StreamState]) -> Self {
        Self { ins, outs }
    }

    /// Units that only read their feeds.
    pub fn feeds(ins: &'a [StreamState]) -> Self {
        Self { ins, outs: &[] }
    }

    pub fn inlet(&self, index: usize, what: &'static str) -> DesignResult<&'a StreamState> {
        self.ins.get(index).ok_or(DesignError::InvalidArg { what })
    }

    /// Outlets are optional for most units; `None` when the framework has
    /// not simulated them yet.
    pub fn outlet(&self, index: usize) -> Option<&'a StreamState> {
        self.outs.get(index)
    }
}

/// Capability shared by every sized-and-costed unit.
///
/// Implementors are plain value types: configuration in, typed design and cost
/// records out. Calls are deterministic, so repeating a pass with the same
/// streams returns bit-identical results.
pub trait Equipment: Send + Sync {
    /// Typed design record produced by `size`.
    type Design;

    /// Unit name for debugging and identification.
    fn name(&self) -> &str;

    /// Mechanical design from the current stream snapshots.
    fn size(&self, streams: UnitStreams<'_>) -> DesignResult<Self::Design>;

    /// Purchase costs (and any consumable replacement) for a design.
    fn cost(&self, design: &Self::Design, index: CostIndex) -> DesignResult<UnitCost>;

    /// Size then cost in one call.
    fn evaluate(
        &self,
        streams: UnitStreams<'_>,
        index: CostIndex,
    ) -> DesignResult<(Self::Design, UnitCost)> {
        let design = self.size(streams)?;
        let cost = self.cost(&design, index)?;
        Ok((design, cost))
    }
}

/// Reactor-style units expose a conversion-like fraction that the external
/// reaction model applies. Setting it outside [0, 1] is a configuration error.
pub trait ConversionFraction {
    fn conversion(&self) -> f64;
    fn set_conversion(&mut self, conversion: f64) -> DesignResult<()>;
}
