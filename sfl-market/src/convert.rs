//! SFL ↔ USD and item → SFL/USD conversion math.

use rust_decimal::Decimal;

/// Smallest accepted amount: 0.00000001.
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 8);

pub fn validate_amount(amount: Decimal) -> bool {
    amount >= MIN_AMOUNT
}

/// USD value of `amount` SFL at `rate` USD per SFL. None on overflow.
pub fn sfl_to_usd(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate)
}

/// SFL bought by `amount` USD at `rate` USD per SFL. None for a zero rate or overflow.
pub fn usd_to_sfl(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_div(rate)
}

/// Price of one unit of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrice {
    pub sfl: Decimal,
    pub usd: Decimal,
}

impl UnitPrice {
    pub fn compute(price: Decimal, rate: Decimal) -> Option<Self> {
        Some(Self {
            sfl: price,
            usd: price.checked_mul(rate)?,
        })
    }
}

/// Value of selling `amount` of an item on the market, after the market fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemQuote {
    pub amount: Decimal,
    pub gross_sfl: Decimal,
    pub gross_usd: Decimal,
    pub fee: Decimal,
    pub net_usd: Decimal,
}

impl ItemQuote {
    pub fn compute(amount: Decimal, price: Decimal, rate: Decimal, fee_rate: Decimal) -> Option<Self> {
        let gross_sfl = amount.checked_mul(price)?;
        let gross_usd = gross_sfl.checked_mul(rate)?;
        let fee = gross_usd.checked_mul(fee_rate)?;
        let net_usd = gross_usd.checked_sub(fee)?;
        Some(Self {
            amount,
            gross_sfl,
            gross_usd,
            fee,
            net_usd,
        })
    }
}
