/// Inclusive per-axis range for editable matrix sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionBounds {
    pub min: usize,
    pub max: usize,
}

impl DimensionBounds {
    pub fn clamp(&self, value: usize) -> usize {
        value.max(self.min).min(self.max)
    }
}

impl Default for DimensionBounds {
    fn default() -> Self {
        DimensionBounds { min: 1, max: 6 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Cofactor expansion is factorial in the order, `None` means no cap.
    pub max_determinant_order: Option<usize>,
    pub dimension_bounds: DimensionBounds,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_determinant_order(mut self, order: usize) -> Self {
        self.max_determinant_order = Some(order);
        self
    }

    pub fn with_dimension_bounds(mut self, min: usize, max: usize) -> Self {
        self.dimension_bounds = DimensionBounds {
            min: min.max(1),
            max: max.max(min.max(1)),
        };
        self
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
