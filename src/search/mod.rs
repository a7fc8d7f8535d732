//! Search execution: paging, sorting, the executor boundary, and the
//! request pipeline.

pub mod executor;
pub mod memory;
pub mod paging;
pub mod service;
pub mod sort;

pub use self::executor::{SearchExecutor, SearchPlan, SearchResult};
pub use self::memory::MemoryExecutor;
pub use self::paging::{PageWindow, window};
pub use self::service::SearchService;
pub use self::sort::{SortField, SortOrder, SortSpec, resolve_sort};
