use std::fmt;

/// The three collections the service owns, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Prizes,
    PromoCodes,
    Activities,
}

impl Table {
    /// Creation order matters: `promo_codes` references `prizes`.
    pub const ALL: [Table; 3] = [Table::Prizes, Table::PromoCodes, Table::Activities];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Prizes => "prizes",
            Table::PromoCodes => "promo_codes",
            Table::Activities => "activities",
        }
    }

    pub fn ddl(&self) -> &'static str {
        match self {
            Table::Prizes => PRIZES_DDL,
            Table::PromoCodes => PROMO_CODES_DDL,
            Table::Activities => ACTIVITIES_DDL,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const PRIZES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS prizes (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL,
    value INTEGER NOT NULL DEFAULT 0,
    redeemed BOOLEAN NOT NULL DEFAULT FALSE,
    expires_at TIMESTAMPTZ,
    redeemed_at TIMESTAMPTZ,
    image_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const PROMO_CODES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS promo_codes (
    id TEXT PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    prize_id TEXT NOT NULL REFERENCES prizes(id),
    is_redeemed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    redeemed_at TIMESTAMPTZ
)
"#;

const ACTIVITIES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
    id TEXT PRIMARY KEY,
    code TEXT NOT NULL,
    success BOOLEAN NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    prize_name TEXT
)
"#;
