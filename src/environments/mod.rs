pub mod reacher;
