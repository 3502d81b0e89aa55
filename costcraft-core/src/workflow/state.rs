use costcraft_schemas::material::Material;

/// The wizard's three sequential steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Details,
    Costs,
    Pricing,
}

impl Step {
    pub fn previous(self) -> Self {
        match self {
            Step::Details | Step::Costs => Step::Details,
            Step::Pricing => Step::Costs,
        }
    }

    /// 1-based position, for "Step N of 3" style display.
    pub fn position(self) -> usize {
        match self {
            Step::Details => 1,
            Step::Costs => 2,
            Step::Pricing => 3,
        }
    }
}

/// In-memory draft state for an estimation being built. Held by the wizard
/// only; nothing is persisted until an explicit save.
#[derive(Debug, Clone, Default)]
pub struct DraftProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub materials: Vec<Material>,
    pub labor_cost: f64,
    pub other_costs: f64,
}

/// Field-level validation messages for the details step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub materials: Option<String>,
}

impl FieldErrors {
    pub fn is_clean(&self) -> bool {
        self.name.is_none() && self.materials.is_none()
    }
}
