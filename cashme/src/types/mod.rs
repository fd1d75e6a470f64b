mod enums;
mod loan;
mod role;
mod ticket;
mod transaction;
mod user;
mod wallet;

pub use enums::*;
pub use loan::*;
pub use role::*;
pub use ticket::*;
pub use transaction::*;
pub use user::*;
pub use wallet::*;
