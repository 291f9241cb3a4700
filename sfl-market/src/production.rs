//! Production-cost calculators: oil drilling and the seasonal Lava Pit.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::MarketError;
use crate::models::PriceTable;

const DRILLS: u32 = 3;
const OIL_PER_BATCH: u32 = 50;
const WOOD_PER_DRILL: u32 = 20;
const IRON_PER_DRILL: u32 = 9;

/// Extra resource each oil drill consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrillResource {
    #[default]
    Leather,
    Wool,
}

impl DrillResource {
    pub fn price_key(&self) -> &'static str {
        match self {
            DrillResource::Leather => "leather",
            DrillResource::Wool => "wool",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DrillResource::Leather => "Leather",
            DrillResource::Wool => "Wool",
        }
    }

    pub fn per_drill(&self) -> u32 {
        match self {
            DrillResource::Leather => 10,
            DrillResource::Wool => 20,
        }
    }
}

impl fmt::Display for DrillResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.price_key())
    }
}

impl FromStr for DrillResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leather" => Ok(DrillResource::Leather),
            "wool" => Ok(DrillResource::Wool),
            other => Err(format!("unknown drill resource: {}", other)),
        }
    }
}

/// Cost breakdown of one batch of three drills (50 oil), in SFL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OilCost {
    pub resource: DrillResource,
    pub total_resource: u32,
    pub wood_cost: Decimal,
    pub iron_cost: Decimal,
    pub resource_cost: Decimal,
    pub total_cost: Decimal,
    pub unit_price: Decimal,
    pub price_10: Decimal,
    pub price_50: Decimal,
}

pub fn oil_cost(prices: &PriceTable, resource: DrillResource) -> Result<OilCost, MarketError> {
    let price_of = |name: &str| {
        prices
            .lookup(name)
            .map(|(_, p)| p)
            .filter(|p| !p.is_zero())
            .ok_or(MarketError::MissingPrices)
    };
    let wood = price_of("wood")?;
    let iron = price_of("iron")?;
    let extra = price_of(resource.price_key())?;

    let total_resource = DRILLS * resource.per_drill();
    let wood_cost = times(wood, DRILLS * WOOD_PER_DRILL)?;
    let iron_cost = times(iron, DRILLS * IRON_PER_DRILL)?;
    let resource_cost = times(extra, total_resource)?;
    let total_cost = wood_cost
        .checked_add(iron_cost)
        .and_then(|t| t.checked_add(resource_cost))
        .ok_or(MarketError::Overflow)?;
    let unit_price = total_cost / Decimal::from(OIL_PER_BATCH);

    Ok(OilCost {
        resource,
        total_resource,
        wood_cost,
        iron_cost,
        resource_cost,
        total_cost,
        unit_price,
        price_10: times(unit_price, 10)?,
        price_50: times(unit_price, 50)?,
    })
}

fn times(price: Decimal, quantity: u32) -> Result<Decimal, MarketError> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or(MarketError::Overflow)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Autumn,
    Winter,
    Spring,
    Summer,
}

impl Season {
    pub fn name(&self) -> &'static str {
        match self {
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
        }
    }
}

/// Item priced at its oil production cost rather than its market price.
const OIL: &str = "oil";

const LAVA_PIT_REQUIREMENTS: [(Season, &[(&str, u32)]); 4] = [
    (
        Season::Autumn,
        &[
            ("artichoke", 30),
            ("broccoli", 750),
            ("yam", 1000),
            ("gold", 5),
            ("crimstone", 4),
        ],
    ),
    (
        Season::Winter,
        &[("merino wool", 200), ("onion", 400), ("turnip", 200)],
    ),
    (
        Season::Spring,
        &[
            ("celestine", 2),
            ("lunara", 2),
            ("duskberry", 2),
            ("rhubarb", 2000),
            ("kale", 100),
        ],
    ),
    (
        Season::Summer,
        &[(OIL, 100), ("pepper", 750), ("zucchini", 1000)],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    Priced {
        name: String,
        quantity: u32,
        total: Decimal,
        /// True for oil, priced at production cost.
        production_cost: bool,
    },
    Missing {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCost {
    pub season: Season,
    pub total: Decimal,
    pub lines: Vec<LineItem>,
}

/// Cost of feeding the Lava Pit each season. Items without a market price are reported and left out of the total.
pub fn lava_pit_costs(
    prices: &PriceTable,
    oil_unit_cost: Decimal,
) -> Result<Vec<SeasonCost>, MarketError> {
    LAVA_PIT_REQUIREMENTS
        .iter()
        .map(|(season, requirements)| {
            let mut total = Decimal::ZERO;
            let mut lines = Vec::with_capacity(requirements.len());

            for &(item, quantity) in requirements.iter() {
                let line = if item == OIL {
                    LineItem::Priced {
                        name: item.to_string(),
                        quantity,
                        total: times(oil_unit_cost, quantity)?,
                        production_cost: true,
                    }
                } else {
                    match prices.lookup(item) {
                        Some((name, price)) => LineItem::Priced {
                            name: name.to_string(),
                            quantity,
                            total: times(price, quantity)?,
                            production_cost: false,
                        },
                        None => LineItem::Missing {
                            name: item.to_string(),
                        },
                    }
                };
                if let LineItem::Priced { total: t, .. } = &line {
                    total = total.checked_add(*t).ok_or(MarketError::Overflow)?;
                }
                lines.push(line);
            }

            Ok(SeasonCost {
                season: *season,
                total,
                lines,
            })
        })
        .collect()
}
