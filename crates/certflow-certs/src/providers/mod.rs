//! Certificate directory and DNS zone clients
//!
//! The capability traits live in `traits`; `acm` and `route53` implement
//! them on top of the AWS SDK.

mod acm;
mod aws;
mod route53;
mod traits;

#[cfg(test)]
pub mod mock;

pub use acm::AcmClient;
pub use route53::Route53Client;
pub use traits::*;

#[cfg(test)]
pub use mock::{MockAcm, MockRoute53};
