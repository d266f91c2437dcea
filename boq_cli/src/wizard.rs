//! Wizard step machine for the estimation flow.
//!
//! The engine itself is pure; this module holds the step sequence as an
//! explicit state value with a pure transition function, so the flow can be
//! tested without any terminal I/O.

use boq_core::reconcile::Reconciliation;

/// The five stops of the estimation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Pick the assembly type and sub-option
    SelectAssembly,
    /// Enter dimensions and configuration
    EnterDimensions,
    /// Pick materials and shops against requirements
    SelectMaterials,
    /// Review reconciliation statuses
    Review,
    /// Final grouped bill
    BillOfQuantities,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SelectAssembly => "Select Assembly",
            WizardStep::EnterDimensions => "Enter Dimensions",
            WizardStep::SelectMaterials => "Select Materials",
            WizardStep::Review => "Review Requirements",
            WizardStep::BillOfQuantities => "Bill of Quantities",
        }
    }

    /// Next step, gated by the current reconciliation snapshot.
    ///
    /// Leaving the review step requires every requirement to be satisfied;
    /// every other transition is unconditional. The final step is terminal.
    pub fn advance(self, reconciliations: &[Reconciliation]) -> WizardStep {
        match self {
            WizardStep::SelectAssembly => WizardStep::EnterDimensions,
            WizardStep::EnterDimensions => WizardStep::SelectMaterials,
            WizardStep::SelectMaterials => WizardStep::Review,
            WizardStep::Review => {
                if boq_core::all_satisfied(reconciliations) {
                    WizardStep::BillOfQuantities
                } else {
                    WizardStep::Review
                }
            }
            WizardStep::BillOfQuantities => WizardStep::BillOfQuantities,
        }
    }

    pub fn back(self) -> WizardStep {
        match self {
            WizardStep::SelectAssembly => WizardStep::SelectAssembly,
            WizardStep::EnterDimensions => WizardStep::SelectAssembly,
            WizardStep::SelectMaterials => WizardStep::EnterDimensions,
            WizardStep::Review => WizardStep::SelectMaterials,
            WizardStep::BillOfQuantities => WizardStep::Review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boq_core::reconcile::{reconcile, ReconcileStatus};
    use boq_core::requirements::TakeoffLine;
    use boq_core::units::Unit;

    fn shortfall() -> Vec<Reconciliation> {
        let req = TakeoffLine::new("Cement", 10.0, Unit::Bags).to_requirement();
        vec![reconcile(&req, &[])]
    }

    #[test]
    fn test_review_blocks_on_unsatisfied() {
        let recs = shortfall();
        assert_eq!(recs[0].status, ReconcileStatus::Missing);
        assert_eq!(WizardStep::Review.advance(&recs), WizardStep::Review);
    }

    #[test]
    fn test_review_passes_when_satisfied() {
        let req = TakeoffLine::new("Cement", 0.0, Unit::Bags).to_requirement();
        let recs = vec![reconcile(&req, &[])];
        assert_eq!(
            WizardStep::Review.advance(&recs),
            WizardStep::BillOfQuantities
        );
    }

    #[test]
    fn test_forward_and_back_walk() {
        let step = WizardStep::SelectAssembly
            .advance(&[])
            .advance(&[])
            .advance(&[]);
        assert_eq!(step, WizardStep::Review);
        assert_eq!(step.back().back().back(), WizardStep::SelectAssembly);
        // back saturates at the first step
        assert_eq!(WizardStep::SelectAssembly.back(), WizardStep::SelectAssembly);
    }
}
