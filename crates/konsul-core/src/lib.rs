pub mod query;
pub mod record;
pub mod turn;

pub use query::SearchQuery;
pub use record::{NO_LINK, RegulationRecord};
pub use turn::{ChatRole, ChatTurn};
