//! Pure ordering and grouping over task collections.

pub mod onetime;
pub mod recurring;
pub mod sections;

pub use onetime::{rank, SortMode};
pub use recurring::{frequency_tables, rank_recurring, FrequencyTables};
pub use sections::{group_sections, Section, SectionedTasks};
