#[cfg(test)]
pub mod impl_fake;
pub mod impl_wikipedia;
pub mod interface;
