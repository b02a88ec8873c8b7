#[macro_use]
pub(crate) mod util;

mod adj;
mod build;
mod colocal;
