// Catalog: public book listings, genre index, and the publish pipeline that
// validates uploads, stores assets in object storage, and extracts the text
// the reader will paginate.

pub mod extract;
pub mod handlers;
pub mod publish;
