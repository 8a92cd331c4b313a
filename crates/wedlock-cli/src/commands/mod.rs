//! Command implementations.

pub mod check;
pub mod divorce;
pub mod list;
pub mod show;

pub use self::check::execute_check;
pub use self::divorce::execute_divorce;
pub use self::list::execute_list;
pub use self::show::execute_show;
