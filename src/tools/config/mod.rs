pub mod magic;
