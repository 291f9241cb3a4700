//! Reply texts (Telegram Markdown).

use rust_decimal::Decimal;
use sfl_market::{
    format_decimal, CacheStatus, DrillResource, ItemQuote, LineItem, OilCost, SeasonCost,
    SlotStatus, UnitPrice, MIN_AMOUNT,
};

pub const GENERIC_ERROR: &str = "❌ Error processing your request";
pub const START_ERROR: &str = "❌ Error showing available items";
pub const PRODUCTION_ERROR: &str = "❌ Could not fetch all required resource prices";
pub const INVALID_RATE: &str = "❌ Invalid exchange rate";
pub const USD_EXAMPLE: &str = "ℹ️ Example: /usd 0.00012345";
pub const SFL_EXAMPLE: &str = "ℹ️ Example: /sfl 1.2345";

pub const HELP: &str = "🛠 *Complete Help*

📝 *Syntax:*
- Items: Case-insensitive, spaces allowed
- Amounts: Numbers with up to 8 decimals

💡 *Examples:*
/Stone ≈ Unit price
/Stone 0.00054321 ≈ Conversion
/usd 1.2345 ≈ Value in USD
/sfl 10.5678 ≈ Value in SFL
/oilcost wool ≈ Oil production cost
/lavapit ≈ Lava Pit seasonal costs";

pub fn min_amount() -> String {
    format!("⚠️ Amount must be at least {}", format_decimal(MIN_AMOUNT))
}

/// Escapes the characters legacy Markdown treats as markup.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn welcome<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let items = items
        .into_iter()
        .map(escape_markdown)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "🌟 *SFL Conversion Bot* 🌟

📌 *Available commands:*
/start - Show this message
/help - Detailed help
`/<item>` ≈ Unit price
`/<item> <amount>` ≈ Conversion with commission
`/usd <amount>` ≈ Convert SFL to USD
`/sfl <amount>` ≈ Convert USD to SFL
`/oilcost [leather|wool]` ≈ Oil production cost
`/lavapit [leather|wool]` ≈ Lava Pit seasonal costs
`/status` ≈ Show cache status

🔹 *Examples:*
/merino wool ≈ Price of Merino Wool
/merino wool 5 ≈ Convert Merino Wool
/usd 1.2345 ≈ Value of SFL
/sfl 10.5678 ≈ Value of USD

📦 *Available items:*
{}",
        items
    )
}

fn slot_line(slot: &SlotStatus) -> String {
    format!(
        "{} (TTL: {}s)",
        if slot.valid { "Valid" } else { "Expired" },
        slot.ttl_secs()
    )
}

pub fn status(status: &CacheStatus) -> String {
    format!(
        "🔄 *System Status*

📊 Prices cache:
{}

💱 Exchange cache:
{}",
        slot_line(&status.prices),
        slot_line(&status.exchange)
    )
}

pub fn usd_conversion(amount: Decimal, usd: Decimal, rate: Decimal) -> String {
    format!(
        "🌻 *{} SFL* ≈ *${} USD*\n📊 Current rate: 1 SFL ≈ ${}",
        format_decimal(amount),
        format_decimal(usd),
        format_decimal(rate)
    )
}

pub fn sfl_conversion(amount: Decimal, sfl: Decimal, rate: Decimal) -> String {
    format!(
        "💵 *${} USD* ≈ *{} SFL*\n📊 Current rate: 1 SFL ≈ ${}",
        format_decimal(amount),
        format_decimal(sfl),
        format_decimal(rate)
    )
}

pub fn unit_price(item: &str, unit: &UnitPrice) -> String {
    format!(
        "📈 1 {} ≈ *{} SFL* (≈ ${} USD)",
        escape_markdown(&capitalize(item)),
        format_decimal(unit.sfl),
        format_decimal(unit.usd)
    )
}

pub fn item_quote(item: &str, quote: &ItemQuote, fee_rate: Decimal) -> String {
    let percent = (fee_rate * Decimal::ONE_HUNDRED).normalize();
    format!(
        "🪙 *{} {}* ≈ *{} SFL*\n💵 Gross value: ≈ *${}*\n📉 Commission ({}%): ≈ *-${}*\n🤑 Net received: ≈ *${}*",
        format_decimal(quote.amount),
        escape_markdown(&capitalize(item)),
        format_decimal(quote.gross_sfl),
        format_decimal(quote.gross_usd),
        percent,
        format_decimal(quote.fee),
        format_decimal(quote.net_usd)
    )
}

pub fn item_not_found(name: &str) -> String {
    format!("❌ Item '{}' not found", escape_markdown(name))
}

pub fn oil_cost(cost: &OilCost) -> String {
    let resource = cost.resource.display_name();
    format!(
        "🛢 *Oil production cost* ({resource})

3 drills ≈ 50 oil
  • Wood x60: {} Flower
  • Iron x27: {} Flower
  • {resource} x{}: {} Flower
💰 Total: *{} Flower*

📈 1 oil ≈ *{} Flower*
10 oil ≈ {} Flower
50 oil ≈ {} Flower",
        format_decimal(cost.wood_cost),
        format_decimal(cost.iron_cost),
        cost.total_resource,
        format_decimal(cost.resource_cost),
        format_decimal(cost.total_cost),
        format_decimal(cost.unit_price),
        format_decimal(cost.price_10),
        format_decimal(cost.price_50),
    )
}

pub fn lava_pit(seasons: &[SeasonCost], resource: DrillResource) -> String {
    let mut out = format!(
        "🌋 *Lava Pit seasonal costs* (oil drilled with {})",
        resource.price_key()
    );
    for season in seasons {
        out.push_str(&format!(
            "\n\n*{}*: {} Flower",
            season.season.name(),
            format_decimal(season.total)
        ));
        for line in &season.lines {
            out.push('\n');
            match line {
                LineItem::Priced {
                    name,
                    quantity,
                    total,
                    production_cost: true,
                } => out.push_str(&format!(
                    "  • {} x{} ({}): {} Flower (production cost)",
                    capitalize(name),
                    quantity,
                    resource,
                    format_decimal(*total)
                )),
                LineItem::Priced {
                    name,
                    quantity,
                    total,
                    production_cost: false,
                } => out.push_str(&format!(
                    "  • {} x{}: {} Flower",
                    escape_markdown(&capitalize(name)),
                    quantity,
                    format_decimal(*total)
                )),
                LineItem::Missing { name } => {
                    out.push_str(&format!("❌ {}: Not found", escape_markdown(name)))
                }
            }
        }
    }
    out
}
