use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertySimError;
use crate::types::{Money, PropertyDetails, Rate};
use crate::PropertySimResult;

/// Rent-proportional cost assumptions.
///
/// Defaults: 10% of rent to the letting agent, 5% set aside for repairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunningCostConfig {
    pub property_management_cut: Rate,
    pub repairs_and_maintenance_cut: Rate,
}

impl Default for RunningCostConfig {
    fn default() -> Self {
        RunningCostConfig {
            property_management_cut: dec!(0.10),
            repairs_and_maintenance_cut: dec!(0.05),
        }
    }
}

impl RunningCostConfig {
    pub fn validate(&self) -> PropertySimResult<()> {
        for (field, cut) in [
            ("property_management_cut", self.property_management_cut),
            ("repairs_and_maintenance_cut", self.repairs_and_maintenance_cut),
        ] {
            if cut < Decimal::ZERO || cut > Decimal::ONE {
                return Err(PropertySimError::InvalidInput {
                    field: field.into(),
                    reason: format!("Cut of rent must be a fraction in [0, 1], got {cut}"),
                });
            }
        }
        Ok(())
    }
}

/// Monthly outgoings by line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningCostBreakdown {
    pub mortgage_payment: Money,
    pub insurance: Money,
    pub service_charge: Money,
    pub ground_rent: Money,
    pub property_management_fee: Money,
    pub repairs_and_maintenance: Money,
    pub total: Money,
}

/// Itemised monthly running cost of `property` at its current rent.
pub fn running_cost_breakdown(
    mortgage_payment: Money,
    property: &PropertyDetails,
    config: &RunningCostConfig,
) -> RunningCostBreakdown {
    let property_management_fee = property.monthly_rent * config.property_management_cut;
    let repairs_and_maintenance = property.monthly_rent * config.repairs_and_maintenance_cut;
    let total = mortgage_payment
        + property.fixed_monthly_costs()
        + property_management_fee
        + repairs_and_maintenance;

    RunningCostBreakdown {
        mortgage_payment,
        insurance: property.insurance,
        service_charge: property.service_charge,
        ground_rent: property.ground_rent,
        property_management_fee,
        repairs_and_maintenance,
        total,
    }
}

/// Total monthly outgoing: mortgage, fixed costs and rent-based fees.
pub fn monthly_running_cost(
    mortgage_payment: Money,
    property: &PropertyDetails,
    config: &RunningCostConfig,
) -> Money {
    running_cost_breakdown(mortgage_payment, property, config).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat() -> PropertyDetails {
        PropertyDetails {
            purchase_price: dec!(200000),
            monthly_rent: dec!(1000),
            insurance: dec!(20),
            service_charge: dec!(100),
            ground_rent: dec!(25),
            annual_price_appreciation: dec!(0.03),
            annual_rent_appreciation: dec!(0.02),
        }
    }

    #[test]
    fn test_default_cuts() {
        let config = RunningCostConfig::default();
        assert_eq!(config.property_management_cut, dec!(0.10));
        assert_eq!(config.repairs_and_maintenance_cut, dec!(0.05));
    }

    #[test]
    fn test_running_cost_with_defaults() {
        let cost = monthly_running_cost(dec!(800), &flat(), &RunningCostConfig::default());
        // 800 + 20 + 100 + 25 + 100 + 50
        assert_eq!(cost, dec!(1095));
    }

    #[test]
    fn test_running_cost_with_overridden_cuts() {
        let config = RunningCostConfig {
            property_management_cut: dec!(0.12),
            repairs_and_maintenance_cut: Decimal::ZERO,
        };
        let breakdown = running_cost_breakdown(dec!(800), &flat(), &config);
        assert_eq!(breakdown.property_management_fee, dec!(120));
        assert_eq!(breakdown.repairs_and_maintenance, Decimal::ZERO);
        assert_eq!(breakdown.total, dec!(1065));
    }

    #[test]
    fn test_partial_config_deserialises_with_defaults() {
        let config: RunningCostConfig =
            serde_json::from_str(r#"{"property_management_cut": "0.12"}"#).unwrap();
        assert_eq!(config.property_management_cut, dec!(0.12));
        assert_eq!(config.repairs_and_maintenance_cut, dec!(0.05));
    }

    #[test]
    fn test_cut_out_of_range_rejected() {
        let config = RunningCostConfig {
            property_management_cut: dec!(10),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PropertySimError::InvalidInput { .. })
        ));
        assert!(RunningCostConfig::default().validate().is_ok());
    }
}
