mod change;
mod price_window;
mod symbol;

pub use change::{ChangeRecord, round2};
pub use price_window::{PriceBar, PriceWindow};
pub use symbol::SymbolRecord;
