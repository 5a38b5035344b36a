use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::PropertySimError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropertySimResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Who holds the property. Selects the stamp duty bracket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorCategory {
    /// Individual investor buying in their own name
    SoleTrader,
    /// Purchase through a limited company
    LimitedCompany,
}

impl InvestorCategory {
    pub const ALL: [InvestorCategory; 2] =
        [InvestorCategory::SoleTrader, InvestorCategory::LimitedCompany];

    pub fn label(&self) -> &'static str {
        match self {
            InvestorCategory::SoleTrader => "Sole Trader",
            InvestorCategory::LimitedCompany => "Limited Company",
        }
    }
}

impl fmt::Display for InvestorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InvestorCategory {
    type Err = PropertySimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalised.as_str() {
            "soletrader" | "individual" => Ok(InvestorCategory::SoleTrader),
            "limitedcompany" | "ltd" | "company" => Ok(InvestorCategory::LimitedCompany),
            _ => Err(PropertySimError::UnknownInvestorCategory(s.to_string())),
        }
    }
}

/// A marginal band: `rate` applies to the slice of the price above `threshold`
/// up to the next bracket's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Money,
    pub rate: Rate,
}

/// Brackets for one investor category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBrackets {
    pub category: InvestorCategory,
    pub brackets: Vec<TaxBracket>,
}

/// Stamp duty bracket table keyed by investor category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDutyTable {
    pub categories: Vec<CategoryBrackets>,
}

impl Default for StampDutyTable {
    /// Additional-property rates (3% surcharge included).
    fn default() -> Self {
        let bracket = |threshold: Money, rate: Rate| TaxBracket { threshold, rate };
        StampDutyTable {
            categories: vec![
                CategoryBrackets {
                    category: InvestorCategory::SoleTrader,
                    brackets: vec![
                        bracket(dec!(0), dec!(0.03)),
                        bracket(dec!(250000), dec!(0.08)),
                        bracket(dec!(925000), dec!(0.13)),
                        bracket(dec!(1500000), dec!(0.15)),
                    ],
                },
                CategoryBrackets {
                    category: InvestorCategory::LimitedCompany,
                    brackets: vec![
                        bracket(dec!(0), dec!(0.03)),
                        bracket(dec!(125000), dec!(0.05)),
                        bracket(dec!(250000), dec!(0.08)),
                        bracket(dec!(925000), dec!(0.13)),
                        bracket(dec!(1500000), dec!(0.15)),
                    ],
                },
            ],
        }
    }
}

impl StampDutyTable {
    /// Brackets for `category`, sorted ascending by threshold.
    pub fn brackets_for(&self, category: InvestorCategory) -> PropertySimResult<Vec<TaxBracket>> {
        let entry = self
            .categories
            .iter()
            .find(|c| c.category == category)
            .filter(|c| !c.brackets.is_empty())
            .ok_or_else(|| PropertySimError::UnknownInvestorCategory(category.to_string()))?;

        let mut brackets = entry.brackets.clone();
        for b in &brackets {
            if b.threshold < Decimal::ZERO {
                return Err(PropertySimError::InvalidInput {
                    field: "threshold".into(),
                    reason: format!("Bracket threshold {} must not be negative", b.threshold),
                });
            }
            if b.rate < Decimal::ZERO {
                return Err(PropertySimError::InvalidInput {
                    field: "rate".into(),
                    reason: format!("Bracket rate {} must not be negative", b.rate),
                });
            }
        }
        brackets.sort_by(|a, b| a.threshold.cmp(&b.threshold));
        Ok(brackets)
    }
}

/// Input for a full stamp duty assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampDutyInput {
    pub purchase_price: Money,
    pub investor_category: InvestorCategory,
    /// Custom bracket table; the built-in table is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<StampDutyTable>,
}

/// Tax charged within one band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandCharge {
    pub threshold: Money,
    /// Upper edge of the band; `None` for the open-ended top band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<Money>,
    pub rate: Rate,
    pub taxable_amount: Money,
    pub tax: Money,
}

/// Stamp duty assessment with a per-band breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampDutyOutput {
    pub stamp_duty: Money,
    /// stamp_duty / purchase_price
    pub effective_rate: Rate,
    pub bands: Vec<BandCharge>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Stamp duty on `purchase_price` using the built-in bracket table.
pub fn calculate_stamp_duty(
    purchase_price: Money,
    category: InvestorCategory,
) -> PropertySimResult<Money> {
    stamp_duty(purchase_price, category, &StampDutyTable::default())
}

/// Progressive marginal stamp duty on `purchase_price` for `category`.
///
/// A price exactly on a threshold is taxed entirely in the lower band.
pub fn stamp_duty(
    purchase_price: Money,
    category: InvestorCategory,
    table: &StampDutyTable,
) -> PropertySimResult<Money> {
    validate_price(purchase_price)?;
    let brackets = table.brackets_for(category)?;
    let total: Money = band_charges(purchase_price, &brackets)
        .iter()
        .map(|b| b.tax)
        .sum();

    tracing::debug!(%purchase_price, %category, stamp_duty = %total, "stamp duty assessed");
    Ok(total)
}

/// Stamp duty with band breakdown, wrapped in the standard output envelope.
pub fn assess_stamp_duty(
    input: &StampDutyInput,
) -> PropertySimResult<ComputationOutput<StampDutyOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_price(input.purchase_price)?;
    let default_table;
    let table = match &input.table {
        Some(t) => t,
        None => {
            default_table = StampDutyTable::default();
            &default_table
        }
    };
    let brackets = table.brackets_for(input.investor_category)?;

    if brackets[0].threshold > Decimal::ZERO {
        warnings.push(format!(
            "Lowest bracket starts at {}; the price below it is untaxed",
            brackets[0].threshold
        ));
    }

    let bands = band_charges(input.purchase_price, &brackets);
    let total: Money = bands.iter().map(|b| b.tax).sum();
    let effective_rate = total / input.purchase_price;

    let output = StampDutyOutput {
        stamp_duty: total,
        effective_rate,
        bands,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Stamp Duty (Progressive Marginal Bands)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Banding
// ---------------------------------------------------------------------------

fn validate_price(purchase_price: Money) -> PropertySimResult<()> {
    if purchase_price <= Decimal::ZERO {
        return Err(PropertySimError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    Ok(())
}

/// Brackets must already be sorted ascending.
fn band_charges(price: Money, brackets: &[TaxBracket]) -> Vec<BandCharge> {
    brackets
        .iter()
        .enumerate()
        .map(|(i, bracket)| {
            let upper = brackets.get(i + 1).map(|next| next.threshold);
            let top = upper.map_or(price, |u| price.min(u));
            let taxable_amount = (top - bracket.threshold).max(Decimal::ZERO);
            BandCharge {
                threshold: bracket.threshold,
                upper,
                rate: bracket.rate,
                taxable_amount,
                tax: taxable_amount * bracket.rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sole_trader_first_band_only() {
        let duty = calculate_stamp_duty(dec!(250000), InvestorCategory::SoleTrader).unwrap();
        // 250,000 * 3% = 7,500
        assert_eq!(duty, dec!(7500));
    }

    #[test]
    fn test_limited_company_three_bands() {
        let duty = calculate_stamp_duty(dec!(600000), InvestorCategory::LimitedCompany).unwrap();
        // 125k * 3% + 125k * 5% + 350k * 8% = 3,750 + 6,250 + 28,000
        assert_eq!(duty, dec!(38000));
    }

    #[test]
    fn test_sole_trader_top_band() {
        let duty = calculate_stamp_duty(dec!(2000000), InvestorCategory::SoleTrader).unwrap();
        // 7,500 + 54,000 + 74,750 + 75,000
        assert_eq!(duty, dec!(211250));
    }

    #[test]
    fn test_threshold_belongs_to_lower_band() {
        let out = assess_stamp_duty(&StampDutyInput {
            purchase_price: dec!(925000),
            investor_category: InvestorCategory::SoleTrader,
            table: None,
        })
        .unwrap();
        let bands = &out.result.bands;
        assert_eq!(bands[1].taxable_amount, dec!(675000));
        assert_eq!(bands[2].taxable_amount, Decimal::ZERO);
        assert_eq!(bands[3].taxable_amount, Decimal::ZERO);
        assert_eq!(out.result.stamp_duty, dec!(61500));
    }

    #[test]
    fn test_unsorted_table_same_result() {
        let mut table = StampDutyTable::default();
        table.categories[1].brackets.reverse();
        let duty = stamp_duty(dec!(600000), InvestorCategory::LimitedCompany, &table).unwrap();
        assert_eq!(duty, dec!(38000));
    }

    #[test]
    fn test_missing_category_in_table() {
        let mut table = StampDutyTable::default();
        table
            .categories
            .retain(|c| c.category != InvestorCategory::LimitedCompany);
        let err = stamp_duty(dec!(300000), InvestorCategory::LimitedCompany, &table).unwrap_err();
        assert!(matches!(err, PropertySimError::UnknownInvestorCategory(_)));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let err = calculate_stamp_duty(Decimal::ZERO, InvestorCategory::SoleTrader).unwrap_err();
        assert!(matches!(err, PropertySimError::InvalidInput { .. }));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut table = StampDutyTable::default();
        table.categories[0].brackets[0].rate = dec!(-0.01);
        let err = stamp_duty(dec!(100000), InvestorCategory::SoleTrader, &table).unwrap_err();
        assert!(matches!(err, PropertySimError::InvalidInput { .. }));
    }

    #[test]
    fn test_effective_rate() {
        let out = assess_stamp_duty(&StampDutyInput {
            purchase_price: dec!(600000),
            investor_category: InvestorCategory::LimitedCompany,
            table: None,
        })
        .unwrap();
        assert_eq!(out.result.effective_rate, dec!(38000) / dec!(600000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Sole Trader".parse::<InvestorCategory>().unwrap(),
            InvestorCategory::SoleTrader
        );
        assert_eq!(
            "limited_company".parse::<InvestorCategory>().unwrap(),
            InvestorCategory::LimitedCompany
        );
        assert_eq!("LTD".parse::<InvestorCategory>().unwrap(), InvestorCategory::LimitedCompany);
        assert!(matches!(
            "partnership".parse::<InvestorCategory>(),
            Err(PropertySimError::UnknownInvestorCategory(_))
        ));
    }
}
