use const_format::concatcp;

// Root
pub const WIKIPEDIA_URL: &str = "https://en.wikipedia.org";

// Paths
pub const SP500_CONSTITUENTS_PATH: &str = "/wiki/List_of_S%26P_500_companies";

// Endpoints
pub const SP500_CONSTITUENTS_URL: &str = concatcp!(WIKIPEDIA_URL, SP500_CONSTITUENTS_PATH);

// Column headers of the constituents table
pub const SYMBOL_COLUMN: &str = "Symbol";
pub const COMPANY_COLUMN: &str = "Security";
