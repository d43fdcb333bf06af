mod addr;
mod error;
mod family;
mod port;

pub use self::addr::SockAddr;
pub use self::error::AddrError;
pub use self::family::{Family, SockType};
pub use self::port::Port;
