//! Sample rows written by the setup procedure.

use chrono::{DateTime, Duration, Utc};

use crate::models::activity::Activity;
use crate::models::prize::{Prize, PrizeCategory};
use crate::models::promo::PromoCode;
use crate::schema::Table;

#[derive(Debug, Clone, PartialEq)]
pub enum SeedRecord {
    Prize(Prize),
    PromoCode(PromoCode),
    Activity(Activity),
}

impl SeedRecord {
    pub fn table(&self) -> Table {
        match self {
            SeedRecord::Prize(_) => Table::Prizes,
            SeedRecord::PromoCode(_) => Table::PromoCodes,
            SeedRecord::Activity(_) => Table::Activities,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SeedRecord::Prize(p) => &p.id,
            SeedRecord::PromoCode(c) => &c.id,
            SeedRecord::Activity(a) => &a.id,
        }
    }
}

fn prize(
    id: &str,
    name: &str,
    description: &str,
    category: PrizeCategory,
    value: i32,
    image_url: Option<&str>,
    now: DateTime<Utc>,
) -> Prize {
    Prize {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        value,
        redeemed: false,
        expires_at: None,
        redeemed_at: None,
        image_url: image_url.map(str::to_string),
        created_at: now,
    }
}

fn code(id: &str, code: &str, prize_id: &str, now: DateTime<Utc>) -> PromoCode {
    PromoCode {
        id: id.to_string(),
        code: code.to_string(),
        prize_id: prize_id.to_string(),
        is_redeemed: false,
        created_at: now,
        redeemed_at: None,
    }
}

/// Marker record written right after a missing table is created.
///
/// `promo_codes` needs its prize in place, so its marker set includes
/// `test-prize` ahead of the code.
pub fn marker_records(table: Table, now: DateTime<Utc>) -> Vec<SeedRecord> {
    let test_prize = prize(
        "test-prize",
        "Test Prize",
        "Test prize description",
        PrizeCategory::Other,
        0,
        None,
        now,
    );

    match table {
        Table::Prizes => vec![SeedRecord::Prize(test_prize)],
        Table::PromoCodes => vec![
            SeedRecord::Prize(test_prize),
            SeedRecord::PromoCode(code("test-code", "TEST123", "test-prize", now)),
        ],
        Table::Activities => vec![SeedRecord::Activity(Activity {
            id: "test-activity".to_string(),
            code: "TEST123".to_string(),
            success: true,
            timestamp: now,
            prize_name: Some("Test Prize".to_string()),
        })],
    }
}

/// The demo data set: four prizes, their codes and a short history.
pub fn sample_records(now: DateTime<Utc>) -> Vec<SeedRecord> {
    let mut free_shipping = prize(
        "prize-2",
        "Free Shipping Voucher",
        "Free shipping on your next order. No minimum purchase required. Valid for standard shipping only.",
        PrizeCategory::Discount,
        5,
        Some("https://images.unsplash.com/photo-1627634777217-c864268db30c?q=80&w=2070&auto=format&fit=crop"),
        now,
    );
    free_shipping.redeemed = true;
    free_shipping.redeemed_at = Some(now);

    let mut freeship_code = code("code-2", "FREESHIP", "prize-2", now);
    freeship_code.is_redeemed = true;
    freeship_code.redeemed_at = Some(now);

    let history = |id: &str, code: &str, days_ago: i64, prize_name: Option<&str>| Activity {
        id: id.to_string(),
        code: code.to_string(),
        success: prize_name.is_some(),
        timestamp: now - Duration::days(days_ago),
        prize_name: prize_name.map(str::to_string),
    };

    vec![
        SeedRecord::Prize(prize(
            "prize-1",
            "10% Discount Coupon",
            "Get 10% off your next purchase. Valid for all products on our store. Cannot be combined with other offers.",
            PrizeCategory::Discount,
            10,
            Some("https://images.unsplash.com/photo-1607082348824-0a96f2a4b9da?q=80&w=2070&auto=format&fit=crop"),
            now,
        )),
        SeedRecord::Prize(free_shipping),
        SeedRecord::Prize(prize(
            "prize-3",
            "VIP Member Status",
            "Exclusive access to VIP deals for 30 days. Includes early access to sales, exclusive discounts, and priority customer service.",
            PrizeCategory::Special,
            50,
            Some("https://images.unsplash.com/photo-1634128221889-82ed6efebfc3?q=80&w=2070&auto=format&fit=crop"),
            now,
        )),
        SeedRecord::Prize(prize(
            "prize-4",
            "50 Bonus Points",
            "50 points added to your loyalty account. Use these points to redeem exclusive rewards and discounts on future purchases.",
            PrizeCategory::Reward,
            50,
            Some("https://images.unsplash.com/photo-1550565118-3a14e8d0386f?q=80&w=2070&auto=format&fit=crop"),
            now,
        )),
        SeedRecord::PromoCode(code("code-1", "WELCOME10", "prize-1", now)),
        SeedRecord::PromoCode(freeship_code),
        SeedRecord::PromoCode(code("code-3", "VIP2024", "prize-3", now)),
        SeedRecord::PromoCode(code("code-4", "BONUS50", "prize-4", now)),
        SeedRecord::Activity(history("activity-1", "WELCOME10", 2, Some("10% Discount Coupon"))),
        SeedRecord::Activity(history("activity-2", "FREESHIP", 7, Some("Free Shipping Voucher"))),
        SeedRecord::Activity(history("activity-3", "INVALID", 1, None)),
    ]
}
