// Reader engine: boilerplate stripping, character-window pagination, and
// position restoration. The cleaner and paginator are pure; all IO
// (upstream fetch, Redis cache, object storage) lives in `fetch`.

pub mod cleaner;
pub mod fetch;
pub mod handlers;
pub mod markers;
pub mod paginator;

pub use markers::MarkerSet;
pub use paginator::{paginate, resolve_page_index};
