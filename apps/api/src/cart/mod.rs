// Shopping cart: add/remove with ownership conflict checks, order totals,
// and the checkout flow that moves paid titles into the library.

pub mod checkout;
pub mod handlers;
pub mod totals;
