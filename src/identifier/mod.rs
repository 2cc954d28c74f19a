pub mod core;
pub mod main;
pub mod render;
pub mod run;
pub mod run_effect;

#[cfg(test)]
mod tests;
