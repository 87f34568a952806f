/// Transaction category that marks investment ledger rows
pub const INVESTMENT_CATEGORY: &str = "Investment";

/// Source tag for rows written by the trade endpoints
pub const INVESTMENT_SOURCE: &str = "investment";

/// Default source for manually recorded transactions
pub const MANUAL_SOURCE: &str = "manual";

/// Instrument type used when a trade does not name one
pub const DEFAULT_INSTRUMENT_TYPE: &str = "Stock";

/// Instrument type reported for ledger rows that carry none
pub const FALLBACK_INSTRUMENT_TYPE: &str = "Security";

/// Default account currency
pub const DEFAULT_CURRENCY: &str = "INR";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Category filter value meaning "every category"
pub const ALL_CATEGORIES: &str = "All";
