pub mod profile;

pub use profile::{ProfileInput, RawProfileInput};
