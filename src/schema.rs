/// Column-name constants for the resource-point datasets.
/// Single source of truth for the loader, aggregation and report code.

// ── Resource point columns ──────────────────────────────────────────────────
pub mod point {
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const RESOURCE_AMOUNT: &str = "resource_amount";
    pub const RESOURCE: &str = "resource";
    pub const COUNTY_NAME: &str = "county_name";
    pub const SCENARIO: &str = "bt23_scenario";
    pub const RESOURCE_PRICE: &str = "resource_price";

    /// Added at load time, never read from the CSV.
    pub const RESOURCE_CATEGORY: &str = "resource_category";

    pub const REQUIRED: [&str; 7] = [
        LATITUDE,
        LONGITUDE,
        RESOURCE_AMOUNT,
        RESOURCE,
        COUNTY_NAME,
        SCENARIO,
        RESOURCE_PRICE,
    ];

    pub const NUMERIC: [&str; 4] = [LATITUDE, LONGITUDE, RESOURCE_AMOUNT, RESOURCE_PRICE];

    /// Numeric columns that must be present on every row.
    pub const NON_NULL: [&str; 3] = [LATITUDE, LONGITUDE, RESOURCE_AMOUNT];
}

// ── Category aggregate columns ──────────────────────────────────────────────
pub mod totals {
    pub const SUM: &str = "amount_sum";
    pub const MEAN: &str = "amount_mean";
    pub const COUNT: &str = "point_count";
}

// ── Units ───────────────────────────────────────────────────────────────────
pub mod units {
    pub const AMOUNT: &str = "dry tonnes/year";
    pub const PRICE: &str = "tonne";
}
